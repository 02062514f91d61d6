
/// Banked register file.
pub mod registers;
