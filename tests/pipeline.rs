use graygrid::cli::process_one;
use graygrid::io::{decode_bytes, decode_path, encode_path, filtered_path, ToneMapping};
use graygrid::{Error, FilterCommand, Grid, GridError};
use image::{GrayImage, Luma, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::TempDir;

fn gradient_png(dir: &TempDir, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let image = GrayImage::from_fn(width, height, |x, y| Luma([(x * 20 + y) as u8]));
    image.save(&path).unwrap();
    path
}

#[test]
fn gray_png_round_trips_with_clamp() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(&dir, "ramp.png", 6, 4);

    let grid = decode_path(&input).unwrap();
    assert_eq!(grid.dim(), (4, 6));
    assert_eq!(grid.get(3, 5), Some(103.0));

    let output = dir.path().join("copy.png");
    encode_path(&grid, &output, ToneMapping::Clamp).unwrap();
    assert_eq!(decode_path(&output).unwrap(), grid);
}

#[test]
fn color_png_is_converted_to_luma() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blue.png");
    RgbImage::from_pixel(3, 2, Rgb([0, 0, 200])).save(&path).unwrap();

    let grid = decode_path(&path).unwrap();
    assert_eq!(grid.dim(), (2, 3));
    // 0.1140 * 200 = 22.8
    assert!(grid.view().iter().all(|&v| (v - 22.8).abs() < 1e-9));
}

#[test]
fn decode_bytes_reads_png_buffer() {
    let image = GrayImage::from_fn(4, 3, |x, y| Luma([(x * 30 + y * 7) as u8]));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .unwrap();

    let grid = decode_bytes(&bytes).unwrap();
    assert_eq!(grid.dim(), (3, 4));
    for y in 0..3u32 {
        for x in 0..4u32 {
            let expected = image.get_pixel(x, y)[0] as f64;
            assert_eq!(grid.get(y as usize, x as usize), Some(expected));
        }
    }
}

#[test]
fn decode_bytes_rejects_garbage() {
    let err = decode_bytes(b"definitely not an image").unwrap_err();
    assert!(matches!(err, Error::Image(_)));
}

#[test]
fn blur_command_shrinks_written_image() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(&dir, "photo.png", 10, 8);
    let output = filtered_path(&input);
    assert_eq!(output.file_name().unwrap(), "photo_filtered.png");

    let command = FilterCommand::parse("blur 3").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    process_one(&input, &output, &command, ToneMapping::Clamp, &mut rng).unwrap();

    let result = decode_path(&output).unwrap();
    assert_eq!(result.dim(), (6, 8));
}

#[test]
fn concat_command_doubles_width() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(&dir, "wide.png", 5, 3);
    let output = dir.path().join("wide_out.png");

    let command = FilterCommand::parse("concat horizontal").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    process_one(&input, &output, &command, ToneMapping::Clamp, &mut rng).unwrap();

    let original = decode_path(&input).unwrap();
    let result = decode_path(&output).unwrap();
    assert_eq!(result.dim(), (3, 10));
    for y in 0..3 {
        for x in 0..5 {
            assert_eq!(result.get(y, x), original.get(y, x));
            assert_eq!(result.get(y, x + 5), original.get(y, x));
        }
    }
}

#[test]
fn salt_and_pepper_is_reproducible_per_seed() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(&dir, "noisy.png", 16, 16);
    let command = FilterCommand::parse("salt and pepper 0.2 0.2").unwrap();

    let run = |name: &str, seed: u64| {
        let output = dir.path().join(name);
        let mut rng = StdRng::seed_from_u64(seed);
        process_one(&input, &output, &command, ToneMapping::Clamp, &mut rng).unwrap();
        decode_path(&output).unwrap()
    };

    assert_eq!(run("a.png", 42), run("b.png", 42));
}

#[test]
fn failed_filter_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let input = gradient_png(&dir, "tiny.png", 2, 2);
    let output = dir.path().join("tiny_out.png");

    let command = FilterCommand::parse("blur 5").unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let err = process_one(&input, &output, &command, ToneMapping::Clamp, &mut rng).unwrap_err();

    assert!(matches!(err, Error::Grid(GridError::InvalidParameter(_))));
    assert!(!output.exists());
}

#[test]
fn segment_then_stretch_keeps_binary_output() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("halves.png");
    let image = GrayImage::from_fn(8, 4, |x, _| Luma([if x < 4 { 20 } else { 230 }]));
    image.save(&path).unwrap();

    let mut grid: Grid = decode_path(&path).unwrap();
    grid.segment().unwrap();

    let output = dir.path().join("halves_out.png");
    encode_path(&grid, &output, ToneMapping::Stretch).unwrap();
    let result = decode_path(&output).unwrap();
    assert!(result.view().iter().all(|&v| v == 0.0 || v == 255.0));
    assert_eq!(result.get(0, 0), Some(0.0));
    assert_eq!(result.get(0, 7), Some(255.0));
}
