use crate::core::{varint, zigzag};
use crate::error::PolylineError;

/// Largest magnitude a scaled value may have and still convert to `i64` exactly.
const MAX_SCALED: f64 = i64::MAX as f64;

/// Per-axis transcoder between coordinate values and delta-encoded varints.
///
/// Holds the fixed-point multiplier and the last scaled value seen on this axis.
/// One instance exists per axis for the duration of a single encode or decode call.
#[derive(Debug, Clone)]
pub(crate) struct DimensionConverter {
    multiplier: f64,
    last_scaled: i64,
}

impl DimensionConverter {
    pub(crate) fn new(precision: u8) -> Self {
        Self {
            multiplier: 10_u64.pow(u32::from(precision)) as f64,
            last_scaled: 0,
        }
    }

    /// Scales `value` to fixed point, rounding half away from zero.
    fn scale(&self, value: f64) -> Result<i64, PolylineError> {
        if !value.is_finite() {
            return Err(PolylineError::OutOfRange(format!(
                "coordinate value {} is not finite",
                value
            )));
        }
        let scaled = (value * self.multiplier).round();
        if scaled.abs() >= MAX_SCALED {
            return Err(PolylineError::OutOfRange(format!(
                "coordinate value {} too large for precision",
                value
            )));
        }
        Ok(scaled as i64)
    }

    /// Appends the delta-encoded varint for `value` and advances the accumulator.
    pub(crate) fn encode_value(&mut self, value: f64, out: &mut String) -> Result<(), PolylineError> {
        let scaled = self.scale(value)?;
        let delta = scaled.wrapping_sub(self.last_scaled);
        self.last_scaled = scaled;
        varint::encode_into(zigzag::encode(delta), out);
        Ok(())
    }

    /// Reads one delta varint at `index`, returning the restored value and the next index.
    pub(crate) fn decode_value(
        &mut self,
        bytes: &[u8],
        index: usize,
    ) -> Result<(f64, usize), PolylineError> {
        let (unsigned, next) = varint::decode(bytes, index)?;
        self.last_scaled = self.last_scaled.wrapping_add(zigzag::decode(unsigned));
        Ok((self.last_scaled as f64 / self.multiplier, next))
    }
}
