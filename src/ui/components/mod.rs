pub mod banner;
pub mod dimensions;
pub mod gauge;
pub mod header;
pub mod instruction;
pub mod processing;
pub mod result;
pub mod spinner;
pub mod uploader;
