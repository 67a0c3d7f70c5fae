pub mod coding;
pub mod denial;
pub mod review;
