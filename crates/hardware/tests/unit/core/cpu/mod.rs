/// LDM/STM, including the user-bank and exception-return forms.
pub mod block_transfer;

/// B, BL, BX and BLX across the three instruction sets.
pub mod branch;



/// Exception raising, servicing and return.
pub mod exceptions;
