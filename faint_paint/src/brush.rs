/// A `w x h` 8-bit opacity map used for stroke stamping.
#[derive(Debug, Clone)]
pub struct Brush {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl Brush {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            data: vec![0; (width as usize) * (height as usize)],
            width,
            height,
        }
    }

    /// A filled circular brush of `diameter`, commonly used for round line
    /// caps (`line_circle`).
    pub fn disc(diameter: u32) -> Self {
        let mut brush = Self::new(diameter, diameter);
        let r = f64::from(diameter) / 2.0;
        for y in 0..diameter {
            for x in 0..diameter {
                let dx = f64::from(x) + 0.5 - r;
                let dy = f64::from(y) + 0.5 - r;
                if dx * dx + dy * dy <= r * r {
                    brush.set(x, y, 255);
                }
            }
        }
        brush
    }

    pub fn width(&self) -> u32 {
        self.width
    }
    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, v: u8) {
        self.data[(y * self.width + x) as usize] = v;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disc_covers_center_not_corner() {
        let brush = Brush::disc(4);
        assert_eq!(brush.get(2, 2), 255);
        assert_eq!(brush.get(0, 0), 0);
    }
}
