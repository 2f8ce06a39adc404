mod graph_forward;
mod layer_network;
mod layer_noise;
mod layer_sample;
mod node_builders;
mod optimize_loss;
mod param_flags;
mod var;
