pub mod ffmpeg;
pub mod sink;
pub mod stream;
