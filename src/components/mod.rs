pub mod annotation_board;
pub mod portal;
