/// ARM instruction encoders.
pub mod arm;


/// Thumb and Thumb-2 instruction encoders.
pub mod thumb;
