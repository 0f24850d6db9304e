use ufmt::{uWrite, uwrite};

/// Writes `value` with exactly `decimals` fraction digits, rounded to the
/// last digit. Readings are truncated before they get here, rounding only
/// absorbs the float error of that truncation.
pub fn write_fixed<W: uWrite + ?Sized>(w: &mut W, value: f32, decimals: u8) -> Result<(), W::Error> {
    let scale = 10u32.pow(decimals as u32);
    let scaled = micromath::F32Ext::round(value * scale as f32);
    let negative = scaled < 0.0;
    let scaled = micromath::F32Ext::abs(scaled) as u32;

    if negative && scaled != 0 {
        w.write_char('-')?;
    }
    uwrite!(w, "{}", scaled / scale)?;
    if decimals > 0 {
        w.write_char('.')?;
        let fraction = scaled % scale;
        let mut divisor = scale / 10;
        while divisor > 0 {
            w.write_char((b'0' + (fraction / divisor % 10) as u8) as char)?;
            divisor /= 10;
        }
    }
    Ok(())
}

/// Watt hours as kilowatt hours with two decimals, `"1.25 kWh"`.
pub fn write_kwh<W: uWrite + ?Sized>(w: &mut W, wh: i32) -> Result<(), W::Error> {
    if wh < 0 {
        w.write_char('-')?;
    }
    let wh = wh.unsigned_abs();
    uwrite!(w, "{}.", wh / 1000)?;
    let centi = wh % 1000 / 10;
    if centi < 10 {
        w.write_char('0')?;
    }
    uwrite!(w, "{} kWh", centi)
}
