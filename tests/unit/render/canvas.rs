use super::*;

#[test]
fn zero_sized_canvas_and_sprite_are_rejected() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Sprite::solid(0, 4, [0, 0, 0, 255]).is_err());
}

#[test]
fn extended_frame_copies_background_and_leaves_strip_black() {
    let bg = Canvas::filled(800, 600, Rgb8::new(10, 20, 30)).unwrap();
    let ext = bg.extended(1.25).unwrap();

    assert_eq!(ext.width(), 800);
    assert_eq!(ext.height(), 750);
    assert_eq!(ext.pixel(0, 0), Some(Rgb8::new(10, 20, 30)));
    assert_eq!(ext.pixel(799, 599), Some(Rgb8::new(10, 20, 30)));
    assert_eq!(ext.pixel(0, 600), Some(Rgb8::BLACK));
    assert_eq!(ext.pixel(799, 749), Some(Rgb8::BLACK));
    assert_eq!(ext.pixel(0, 750), None);

    // The source is never touched.
    assert_eq!(bg.height(), 600);
}

#[test]
fn extended_height_rounds_to_nearest_row() {
    assert_eq!(extended_height(600, 1.25), 750);
    assert_eq!(extended_height(101, 1.25), 126);
    assert_eq!(extended_height(3, 1.25), 4);
}

#[test]
fn extension_ratio_below_one_is_rejected() {
    let bg = Canvas::new(4, 4).unwrap();
    assert!(bg.extended(0.5).is_err());
    assert!(bg.extended(f64::NAN).is_err());
}

#[test]
fn sprite_rotations_swap_dimensions_and_move_corners() {
    let mut img = image::RgbaImage::new(3, 2);
    img.put_pixel(0, 0, image::Rgba([255, 0, 0, 255]));
    let sprite = Sprite::from_image(img).unwrap();

    let ccw = sprite.rotated_ccw();
    assert_eq!((ccw.width(), ccw.height()), (2, 3));
    // Top-left goes to bottom-left when turning counter-clockwise.
    assert_eq!(ccw.pixel(0, 2), [255, 0, 0, 255]);

    let cw = sprite.rotated_cw();
    assert_eq!((cw.width(), cw.height()), (2, 3));
    // Top-left goes to top-right when turning clockwise.
    assert_eq!(cw.pixel(1, 0), [255, 0, 0, 255]);
}
