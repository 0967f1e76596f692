use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        GradiaError::invalid_color("x")
            .to_string()
            .contains("invalid color format:")
    );
    assert!(
        GradiaError::config_parse("x")
            .to_string()
            .contains("config parse error:")
    );
    assert!(
        GradiaError::unsupported_by_gpu("x")
            .to_string()
            .contains("unsupported by gpu path:")
    );
    assert!(
        GradiaError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(GradiaError::gpu("x").to_string().contains("gpu error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GradiaError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
