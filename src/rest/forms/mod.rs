pub mod pet;
pub mod user;

/// One uploaded file lifted out of a multipart stream
#[derive(Debug)]
pub struct ImageUpload {
    pub filename_extension: String,
    pub body: Vec<u8>,
}
