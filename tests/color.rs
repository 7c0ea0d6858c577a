mod tests {
    use myrtio_strands::color::{Channel, PixelColor, PixelOrder, Rgb};
    use myrtio_strands::math8::{brightness_to_scale, scale8};
    use myrtio_strands::ConfigError;

    #[test]
    fn test_parse_pixel_order() {
        assert_eq!(PixelOrder::parse("GRB"), Ok(PixelOrder::GRB));
        assert_eq!(PixelOrder::parse("rgbw"), Ok(PixelOrder::RGBW));
        assert_eq!(
            PixelOrder::parse("BRG").unwrap().channels(),
            &[Channel::Blue, Channel::Red, Channel::Green]
        );
        assert_eq!(PixelOrder::parse("GRBW").unwrap().bytes_per_pixel(), 4);
    }

    #[test]
    fn test_parse_invalid_pixel_order() {
        for order in ["", "RG", "RGBX", "RGGB", "RGBWR"] {
            assert_eq!(PixelOrder::parse(order), Err(ConfigError::PixelOrder), "{order}");
        }
    }

    #[test]
    fn test_pixel_order_from_indices() {
        assert_eq!(PixelOrder::from_indices(&[1, 0, 2]), Ok(PixelOrder::GRB));
        assert_eq!(PixelOrder::from_indices(&[1, 0, 2, 3]), Ok(PixelOrder::GRBW));
        assert_eq!(
            PixelOrder::from_indices(&[0, 1, 4]),
            Err(ConfigError::PixelOrder)
        );
        assert_eq!(
            PixelOrder::from_indices(&[0, 0, 1]),
            Err(ConfigError::PixelOrder)
        );
    }

    #[test]
    fn test_default_pixel_order() {
        assert_eq!(PixelOrder::default_for(3), PixelOrder::GRB);
        assert_eq!(PixelOrder::default_for(4), PixelOrder::GRBW);
        assert!(!PixelOrder::GRB.has_white());
        assert!(PixelOrder::GRBW.has_white());
    }

    #[test]
    fn test_write_and_read_wire_order() {
        let color = PixelColor::new(1, 2, 3, 4);
        let mut bytes = [0u8; 4];
        PixelOrder::GRBW.write(color, &mut bytes);
        assert_eq!(bytes, [2, 1, 3, 4]);
        assert_eq!(PixelOrder::GRBW.read(&bytes), color);

        let mut bytes = [0u8; 3];
        PixelOrder::GRB.write(color, &mut bytes);
        assert_eq!(bytes, [2, 1, 3]);
        assert_eq!(PixelOrder::GRB.read(&bytes), PixelColor::rgb(1, 2, 3));
    }

    #[test]
    fn test_pixel_color_conversions() {
        assert_eq!(
            PixelColor::from(0x10FF_8000),
            PixelColor::new(0xFF, 0x80, 0x00, 0x10)
        );
        assert_eq!(PixelColor::from(Rgb::new(1, 2, 3)), PixelColor::rgb(1, 2, 3));
        assert_eq!(Rgb::from(PixelColor::new(1, 2, 3, 4)), Rgb::new(1, 2, 3));
        assert_eq!(PixelColor::from((9, 8, 7, 6)), PixelColor::new(9, 8, 7, 6));
    }

    #[test]
    fn test_brightness_to_scale() {
        assert_eq!(brightness_to_scale(1.0), 255);
        assert_eq!(brightness_to_scale(0.5), 128);
        assert_eq!(brightness_to_scale(0.0), 0);
        assert_eq!(brightness_to_scale(-1.0), 0);
        assert_eq!(brightness_to_scale(3.0), 255);
        assert_eq!(brightness_to_scale(f32::NAN), 0);
    }

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 255), 255);
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(128, 0), 0);
    }
}
