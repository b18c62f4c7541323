use std::io::Cursor;

use super::*;

#[test]
fn synthesized_placeholder_is_fixed_size() {
    let img = not_found_image(
        Rgba8::opaque(0, 0, 0),
        Rgba8::opaque(0, 255, 0),
        "image not available",
        None,
        ImageFormat::Jpeg,
    );
    assert_eq!(img.pixels.width(), PLACEHOLDER_EDGE);
    assert_eq!(img.pixels.height(), PLACEHOLDER_EDGE);
    assert_eq!(img.format, ImageFormat::Jpeg);
    assert_eq!(img.depth, ColorDepth::TrueColor);
}

#[test]
fn synthesized_placeholder_fills_the_background() {
    let img = not_found_image(
        Rgba8::opaque(7, 8, 9),
        Rgba8::opaque(0, 255, 0),
        "x",
        None,
        ImageFormat::Png,
    );
    // Corners sit outside the text rectangle.
    assert_eq!(*img.pixels.get_pixel(0, 0), image::Rgba([7, 8, 9, 255]));
    assert_eq!(
        *img.pixels.get_pixel(PLACEHOLDER_EDGE - 1, PLACEHOLDER_EDGE - 1),
        image::Rgba([7, 8, 9, 255])
    );
}

#[test]
fn configured_image_wins_when_loadable() {
    let dir = std::env::temp_dir().join(format!("thumbweave-fallback-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("missing.png");

    let png = RgbaImage::from_pixel(11, 7, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(png)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(&path, buf).unwrap();

    let img = not_found_image(
        Rgba8::WHITE,
        Rgba8::RED,
        "ignored",
        Some(&path),
        ImageFormat::Jpeg,
    );
    assert_eq!((img.pixels.width(), img.pixels.height()), (11, 7));
    // The output format follows the request, not the configured file.
    assert_eq!(img.format, ImageFormat::Jpeg);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn unreadable_configured_image_falls_back_to_synthesis() {
    let img = not_found_image(
        Rgba8::opaque(0, 0, 0),
        Rgba8::RED,
        "nope",
        Some(std::path::Path::new("/definitely/not/here.png")),
        ImageFormat::Png,
    );
    assert_eq!(img.pixels.width(), PLACEHOLDER_EDGE);
}

#[test]
fn word_wrap_is_greedy() {
    assert_eq!(wrap_text("a b c", 3), vec!["a b", "c"]);
    assert_eq!(wrap_text("longword", 3), vec!["longword"]);
    assert_eq!(wrap_text("", 10), Vec::<String>::new());
    assert_eq!(
        wrap_text("image not available", 9),
        vec!["image not", "available"]
    );
}

#[test]
fn xml_escaping_covers_markup_characters() {
    assert_eq!(escape_xml(r#"<a & "b">"#), "&lt;a &amp; &quot;b&quot;&gt;");
}
