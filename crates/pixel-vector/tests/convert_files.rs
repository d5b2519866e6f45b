use std::fs;

use image::{GrayImage, Luma, Rgb, RgbImage, Rgba as ImgRgba, RgbaImage};
use pixel_vector::{Converter, RasterError, Template, load_rgba, output_path, save_document};

#[test]
fn png_round_trips_through_load_convert_save() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("sprite.png");

    let mut img = RgbaImage::from_pixel(3, 2, ImgRgba([0, 0, 0, 0]));
    img.put_pixel(0, 0, ImgRgba([255, 0, 0, 255]));
    img.put_pixel(0, 1, ImgRgba([255, 0, 0, 255]));
    img.put_pixel(2, 1, ImgRgba([0, 0, 255, 255]));
    img.save(&input).expect("write png");

    let grid = load_rgba(&input).expect("decode png");
    let conv = Converter::default().convert(&grid.as_view());
    let svg = conv.render(&Template::default()).expect("render");

    let out = output_path(&dir.path().join("output"), &input);
    fs::create_dir_all(out.parent().expect("parent")).expect("mkdir");
    save_document(&out, &svg).expect("save");

    assert_eq!(out.file_name().and_then(|n| n.to_str()), Some("sprite.svg"));
    let written = fs::read_to_string(&out).expect("read back");
    assert_eq!(written, svg);
    assert_eq!(written.matches("<rect").count(), 3);
    assert_eq!(written.matches("id=\"g_").count(), 1);
    assert_eq!(conv.stats.transparent_pixels, 3);
    assert!(!out.with_extension("svg.partial").exists());
}

#[test]
fn rgb_png_is_fully_opaque() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("flat.png");
    RgbImage::from_pixel(4, 4, Rgb([12, 34, 56]))
        .save(&input)
        .expect("write png");

    let grid = load_rgba(&input).expect("decode png");
    let conv = Converter::default().convert(&grid.as_view());

    assert_eq!(conv.stats.opaque_pixels, 16);
    assert_eq!(conv.stats.regions, 1);
    assert!(conv.body.contains("fill:#0C2238;"));
}

#[test]
fn grayscale_input_is_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("gray.png");
    GrayImage::from_pixel(2, 2, Luma([128]))
        .save(&input)
        .expect("write png");

    match load_rgba(&input) {
        Err(RasterError::UnsupportedChannels { channels, .. }) => assert_eq!(channels, 1),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn undecodable_input_is_a_decode_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let input = dir.path().join("broken.png");
    fs::write(&input, b"definitely not a png").expect("write");

    assert!(matches!(
        load_rgba(&input),
        Err(RasterError::Decode { .. })
    ));
}

#[test]
fn save_into_missing_directory_leaves_nothing_behind() {
    let dir = tempfile::tempdir().expect("tempdir");
    let out = dir.path().join("missing").join("doc.svg");

    assert!(matches!(
        save_document(&out, "<svg/>"),
        Err(RasterError::Io { .. })
    ));
    assert!(!out.exists());
}
