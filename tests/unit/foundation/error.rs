use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ThumbnailError::invalid_request("x")
            .to_string()
            .contains("invalid request:")
    );
    assert!(
        ThumbnailError::encoding("x")
            .to_string()
            .contains("encoding error:")
    );
    assert!(
        ThumbnailError::config("x")
            .to_string()
            .contains("configuration error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ThumbnailError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
