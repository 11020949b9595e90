use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        SweepError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(SweepError::render("x").to_string().contains("render error:"));
    assert!(SweepError::encode("x").to_string().contains("encode error:"));
    assert!(
        SweepError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("disk full");
    let err = SweepError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("disk full"));
}
