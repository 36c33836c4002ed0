mod contact;

pub use contact::{Contact, ContactFields, PhoneNumber, PhoneType};
