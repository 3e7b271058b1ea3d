use crate::error::Error;

const LUMA_RED_WEIGHT: f64 = 0.299;
const LUMA_GREEN_WEIGHT: f64 = 0.587;
const LUMA_BLUE_WEIGHT: f64 = 0.114;

const MAX_CHANNEL_VALUE: u32 = u8::MAX as u32;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RGBColorFormat<T> {
    pub red: T,
    pub green: T,
    pub blue: T,
}

/// A color sample as stored in a file, valid in the range `0..=max`.
pub struct RangeColorFormat<T> {
    max: T,
    red: T,
    green: T,
    blue: T,
}

impl<T> RGBColorFormat<T> {
    pub fn new(red: T, green: T, blue: T) -> Self {
        RGBColorFormat { red, green, blue }
    }
}

impl RGBColorFormat<u8> {
    pub const BLACK: Self = RGBColorFormat {
        red: 0,
        green: 0,
        blue: 0,
    };

    /// Weighted luminance, truncated toward zero.
    pub fn luminance(&self) -> u8 {
        let weighted_red = LUMA_RED_WEIGHT * self.red as f64;
        let weighted_green = LUMA_GREEN_WEIGHT * self.green as f64;
        let weighted_blue = LUMA_BLUE_WEIGHT * self.blue as f64;
        (weighted_red + weighted_green + weighted_blue) as u8
    }

    pub fn from_luminance(value: u8) -> Self {
        RGBColorFormat::new(value, value, value)
    }
}

impl From<&RangeColorFormat<u16>> for RGBColorFormat<u8> {
    fn from(value: &RangeColorFormat<u16>) -> Self {
        let scale = |component: u16| {
            (component as u32 * MAX_CHANNEL_VALUE / value.max as u32) as u8
        };
        RGBColorFormat {
            red: scale(value.red),
            green: scale(value.green),
            blue: scale(value.blue),
        }
    }
}

impl From<RangeColorFormat<u16>> for RGBColorFormat<u8> {
    fn from(value: RangeColorFormat<u16>) -> Self {
        RGBColorFormat::from(&value)
    }
}

impl<T> RangeColorFormat<T>
where
    T: PartialOrd<T> + Copy + Into<u16>,
{
    pub fn new(max: T, red: T, green: T, blue: T) -> crate::Result<Self> {
        for component in [red, green, blue] {
            if component > max {
                return Err(Error::ColorValueExceedsMaxValue(
                    component.into(),
                    max.into(),
                ));
            }
        }
        Ok(RangeColorFormat {
            max,
            red,
            green,
            blue,
        })
    }
}
