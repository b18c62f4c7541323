use super::*;

fn opts(pairs: &[(&str, &str)]) -> OptionSet {
    OptionSet::from_pairs(pairs.iter().copied())
}

#[test]
fn defaults_depend_on_format_transparency() {
    let config = ThumbnailConfig::default();
    let png = ResolvedOptions::resolve(&OptionSet::default(), &config, ImageFormat::Png);
    assert_eq!(png.background, Rgba8::TRANSPARENT);
    let gif = ResolvedOptions::resolve(&OptionSet::default(), &config, ImageFormat::Gif);
    assert_eq!(gif.background, Rgba8::TRANSPARENT);
    let jpg = ResolvedOptions::resolve(&OptionSet::default(), &config, ImageFormat::Jpeg);
    assert_eq!(jpg.background, Rgba8::WHITE);
}

#[test]
fn configured_background_overrides_format_default() {
    let config = ThumbnailConfig {
        background: Some(Rgba8::opaque(1, 2, 3)),
        ..Default::default()
    };
    let r = ResolvedOptions::resolve(&OptionSet::default(), &config, ImageFormat::Png);
    assert_eq!(r.background, Rgba8::opaque(1, 2, 3));
}

#[test]
fn query_colors_override_when_well_formed() {
    let config = ThumbnailConfig::default();
    let r = ResolvedOptions::resolve(
        &opts(&[("bg", "010203"), ("fg", "0a0b0c")]),
        &config,
        ImageFormat::Jpeg,
    );
    assert_eq!(r.background, Rgba8::opaque(1, 2, 3));
    assert_eq!(r.foreground, Rgba8::opaque(10, 11, 12));
}

#[test]
fn malformed_values_keep_defaults() {
    let config = ThumbnailConfig::default();
    let r = ResolvedOptions::resolve(
        &opts(&[("bg", "zzzzzz"), ("fg", "12"), ("inside", "maybe")]),
        &config,
        ImageFormat::Jpeg,
    );
    assert_eq!(r.background, Rgba8::WHITE);
    assert_eq!(r.foreground, config.foreground);
    assert_eq!(r.fit_inside, config.fit_inside);
}

#[test]
fn inside_parses_case_insensitively() {
    let config = ThumbnailConfig::default();
    let r = ResolvedOptions::resolve(&opts(&[("inside", "False")]), &config, ImageFormat::Jpeg);
    assert!(!r.fit_inside);
    let r = ResolvedOptions::resolve(&opts(&[("inside", "TRUE")]), &config, ImageFormat::Jpeg);
    assert!(r.fit_inside);
}

#[test]
fn mask_requires_the_eight_digit_form() {
    let config = ThumbnailConfig::default();
    let r = ResolvedOptions::resolve(&opts(&[("mask", "80ff0000")]), &config, ImageFormat::Png);
    assert_eq!(
        r.mask,
        Rgba8 {
            r: 255,
            g: 0,
            b: 0,
            a: 0x80
        }
    );

    // A six-digit mask would be fully opaque; it is ignored instead.
    let r = ResolvedOptions::resolve(&opts(&[("mask", "ff0000")]), &config, ImageFormat::Png);
    assert_eq!(r.mask, Rgba8::TRANSPARENT);
}

#[test]
fn text_override() {
    let config = ThumbnailConfig::default();
    let r = ResolvedOptions::resolve(&opts(&[("txt", "gone")]), &config, ImageFormat::Jpeg);
    assert_eq!(r.text, "gone");
    let r = ResolvedOptions::resolve(&OptionSet::default(), &config, ImageFormat::Jpeg);
    assert_eq!(r.text, config.not_found_text);
}
