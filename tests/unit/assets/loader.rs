use std::io::Cursor;

use super::*;

fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn gif_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
    let mut buf = Vec::new();
    {
        let mut enc = image::codecs::gif::GifEncoder::new(Cursor::new(&mut buf));
        enc.encode(img.as_raw(), width, height, image::ExtendedColorType::Rgba8)
            .unwrap();
    }
    buf
}

#[test]
fn format_classification_follows_extension() {
    assert_eq!(ImageFormat::from_source_name("a.gif"), ImageFormat::Gif);
    assert_eq!(ImageFormat::from_source_name("a.PNG"), ImageFormat::Png);
    assert_eq!(ImageFormat::from_source_name("a.jpg"), ImageFormat::Jpeg);
    assert_eq!(ImageFormat::from_source_name("a.jpeg"), ImageFormat::Jpeg);
    // Neither GIF nor PNG encodes as JPEG.
    assert_eq!(ImageFormat::from_source_name("a.bmp"), ImageFormat::Jpeg);
    assert_eq!(ImageFormat::from_source_name("a.tiff"), ImageFormat::Jpeg);
}

#[test]
fn transparency_support() {
    assert!(ImageFormat::Png.supports_transparency());
    assert!(ImageFormat::Gif.supports_transparency());
    assert!(!ImageFormat::Jpeg.supports_transparency());
}

#[test]
fn decode_png_is_true_color() {
    let src = decode_source(&png_bytes(4, 3), "photo.png").unwrap();
    assert_eq!(src.size(), Size::new(4, 3));
    assert_eq!(src.format, ImageFormat::Png);
    assert_eq!(src.depth, ColorDepth::TrueColor);
    assert!(!src.depth.is_indexed());
}

#[test]
fn decode_gif_is_indexed() {
    let src = decode_source(&gif_bytes(2, 2), "anim.gif").unwrap();
    assert_eq!(src.format, ImageFormat::Gif);
    assert_eq!(src.depth, ColorDepth::Indexed8);
    assert!(src.depth.is_indexed());
}

#[test]
fn decode_garbage_is_an_error() {
    assert!(matches!(
        decode_source(b"not an image", "x.jpg"),
        Err(LoadError::Decode(_))
    ));
}

#[test]
fn fs_loader_roundtrip_and_not_found() {
    let dir = std::env::temp_dir().join(format!("thumbweave-loader-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("photo.png"), png_bytes(5, 5)).unwrap();

    let loader = FsLoader::new(&dir);
    let src = loader.load("photo.png").unwrap();
    assert_eq!(src.size(), Size::new(5, 5));

    assert!(matches!(
        loader.load("missing.png"),
        Err(LoadError::NotFound(_))
    ));
    assert!(matches!(
        loader.load("../photo.png"),
        Err(LoadError::NotFound(_))
    ));
    assert!(matches!(
        loader.load("/etc/passwd"),
        Err(LoadError::NotFound(_))
    ));

    std::fs::remove_dir_all(&dir).ok();
}
