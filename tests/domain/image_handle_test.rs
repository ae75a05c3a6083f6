use bytes::Bytes;

use quizpress::domain::{ImageHandle, ImageHandleError, content_type_for, extension_for};

#[test]
fn given_embedded_image_when_rendering_wire_then_data_url() {
    let handle = ImageHandle::embedded("word/media/image1.PNG", Bytes::from_static(b"abc"));

    assert_eq!(handle.to_wire(), "data:image/png;base64,YWJj");
}

#[test]
fn given_data_url_when_parsing_then_embedded_image_with_bytes() {
    let handle = ImageHandle::from_wire("data:image/jpeg;base64,YWJj").unwrap();

    match handle {
        ImageHandle::Embedded(image) => {
            assert_eq!(image.content_type, "image/jpeg");
            assert_eq!(image.name, "upload.jpg");
            assert_eq!(&image.data[..], b"abc");
        }
        ImageHandle::Url(url) => panic!("expected embedded image, got url {url}"),
    }
}

#[test]
fn given_plain_url_when_parsing_then_url_handle() {
    let handle = ImageHandle::from_wire("/images/quizzes/a/b.png").unwrap();

    assert_eq!(handle, ImageHandle::Url("/images/quizzes/a/b.png".to_string()));
    assert!(!handle.is_embedded());
}

#[test]
fn given_malformed_data_url_when_parsing_then_rejected() {
    assert_eq!(
        ImageHandle::from_wire("data:image/png,YWJj"),
        Err(ImageHandleError::MalformedDataUrl)
    );
    assert!(matches!(
        ImageHandle::from_wire("data:image/png;base64,!!!"),
        Err(ImageHandleError::InvalidBase64(_))
    ));
    assert_eq!(
        ImageHandle::from_wire("data:image/png;base64,"),
        Err(ImageHandleError::Empty)
    );
}

#[test]
fn given_known_extensions_when_mapping_then_types_round_trip() {
    assert_eq!(content_type_for("a.jpeg"), "image/jpeg");
    assert_eq!(extension_for("image/jpeg"), "jpg");
    assert_eq!(content_type_for("no-extension"), "application/octet-stream");
    assert_eq!(extension_for("application/octet-stream"), "bin");
}
