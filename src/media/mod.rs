pub mod codec;
pub mod thumbnail;

pub use codec::{
    ImageHandle, SelectedFile, encode_file_as_image, is_image, mime_type_of, raw_payload_of,
};
pub use thumbnail::Thumbnail;
