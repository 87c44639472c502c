//! Image attachments held client-side until submission.

use bytes::Bytes;

use super::error::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaAttachment {
    file_name: String,
    content_type: String,
    bytes: Bytes,
}

impl MediaAttachment {
    /// Build an image attachment, guessing the MIME type from `file_name`.
    pub fn image(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Result<Self, DomainError> {
        let file_name = file_name.into();
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(DomainError::validation(format!(
                "attachment `{file_name}` is empty"
            )));
        }

        let content_type = mime_guess::from_path(&file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        if !content_type.starts_with("image/") {
            return Err(DomainError::validation(format!(
                "attachment `{file_name}` is not an image ({content_type})"
            )));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_type_is_guessed_from_extension() {
        let media = MediaAttachment::image("cover.png", vec![1_u8, 2, 3]).expect("image");
        assert_eq!(media.content_type(), "image/png");
        assert_eq!(media.len(), 3);
    }

    #[test]
    fn non_images_are_rejected() {
        let err = MediaAttachment::image("notes.txt", b"hi".to_vec()).expect_err("text");
        assert!(matches!(err, DomainError::Validation { .. }));
    }

    #[test]
    fn empty_payloads_are_rejected() {
        assert!(MediaAttachment::image("cover.jpg", Vec::<u8>::new()).is_err());
    }
}
