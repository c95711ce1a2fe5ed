pub mod match_renderer;
