use rand::Rng;
use voxshape_common::Rgb;

/// Size used for any token outside small/medium/large.
pub const DEFAULT_SIZE: f32 = 50.0;

/// Map a size token to a pixel size.
pub fn size_for(token: &str) -> f32 {
    match token {
        "small" => 30.0,
        "medium" => 50.0,
        "large" => 70.0,
        _ => DEFAULT_SIZE,
    }
}

/// Fixed triple for a palette color token, if it is one.
pub fn named_color(token: &str) -> Option<Rgb> {
    let rgb = match token {
        "red" => Rgb::new(255, 0, 0),
        "blue" => Rgb::new(0, 0, 255),
        "green" => Rgb::new(0, 255, 0),
        "yellow" => Rgb::new(255, 255, 0),
        "purple" => Rgb::new(128, 0, 128),
        "orange" => Rgb::new(255, 165, 0),
        _ => return None,
    };
    Some(rgb)
}

/// Palette color for `token`, or a random color with each channel in [0, 255).
pub fn color_for<R: Rng>(token: &str, rng: &mut R) -> Rgb {
    named_color(token).unwrap_or_else(|| {
        Rgb::new(
            rng.gen_range(0..255),
            rng.gen_range(0..255),
            rng.gen_range(0..255),
        )
    })
}

/// Palette tokens, in a stable order.
pub const COLOR_TOKENS: [&str; 6] = ["red", "blue", "green", "yellow", "purple", "orange"];

/// Size tokens, smallest first.
pub const SIZE_TOKENS: [&str; 3] = ["small", "medium", "large"];

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn size_tokens_map_exactly() {
        assert_eq!(size_for("small"), 30.0);
        assert_eq!(size_for("medium"), 50.0);
        assert_eq!(size_for("large"), 70.0);
    }

    #[test]
    fn unknown_size_defaults_to_fifty() {
        for token in ["", "huge", "Large", "70"] {
            assert_eq!(size_for(token), DEFAULT_SIZE, "token {token:?}");
        }
    }

    #[test]
    fn palette_colors_are_fixed() {
        assert_eq!(named_color("red"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(named_color("blue"), Some(Rgb::new(0, 0, 255)));
        assert_eq!(named_color("green"), Some(Rgb::new(0, 255, 0)));
        assert_eq!(named_color("yellow"), Some(Rgb::new(255, 255, 0)));
        assert_eq!(named_color("purple"), Some(Rgb::new(128, 0, 128)));
        assert_eq!(named_color("orange"), Some(Rgb::new(255, 165, 0)));
        assert_eq!(named_color("teal"), None);
    }

    #[test]
    fn palette_ignores_rng() {
        let mut rng = StdRng::seed_from_u64(1);
        for token in COLOR_TOKENS {
            assert_eq!(Some(color_for(token, &mut rng)), named_color(token));
        }
    }

    #[test]
    fn unknown_color_channels_stay_below_255() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let c = color_for("chartreuse", &mut rng);
            assert!(c.r < 255 && c.g < 255 && c.b < 255);
        }
    }

    #[test]
    fn unknown_color_is_reproducible_with_seed() {
        let a = color_for("mauve", &mut StdRng::seed_from_u64(99));
        let b = color_for("mauve", &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }
}
