pub mod cornell_box;
