mod identifier;
mod token;

pub use identifier::{Identifier, InvalidIdentifier};
pub use token::{InvalidKeyToken, KeyToken};
