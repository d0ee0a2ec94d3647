//! Register values for a 16-bit timer counting up and down.
//!
//! One full cycle walks 0 → ARR → 0, so a period of `period` ticks is
//! `ARR = period / 2`. In PWM mode 1 the output is high while `CNT < CCR`,
//! giving `CCR = width / 2`; full scale needs `CCR = ARR + 1` so the output
//! never drops at the top of the count.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterError {
    /// PSC holds `divider - 1` in 16 bits.
    DividerOutOfRange(u32),
    /// Half the period is zero or leaves no room for `ARR + 1` in 16 bits.
    PeriodOutOfRange(u32),
    PulseOutOfRange(u32),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CenterAligned {
    pub arr: u16,
    pub ccr: u16,
}

/// Highest ARR whose full-scale compare value still fits the register.
const MAX_ARR: u32 = u16::MAX as u32 - 1;

/// PSC value that divides the timer clock by `divider`.
pub const fn prescaler(divider: u32) -> Result<u16, CounterError> {
    if divider == 0 || divider > u16::MAX as u32 + 1 {
        return Err(CounterError::DividerOutOfRange(divider));
    }
    Ok((divider - 1) as u16)
}

pub const fn center_aligned_arr(period: u32) -> Result<u16, CounterError> {
    let arr = period / 2;
    if arr == 0 || arr > MAX_ARR {
        return Err(CounterError::PeriodOutOfRange(period));
    }
    Ok(arr as u16)
}

pub const fn center_aligned(period: u32, width: u32) -> Result<CenterAligned, CounterError> {
    let arr = match center_aligned_arr(period) {
        Ok(arr) => arr,
        Err(e) => return Err(e),
    };
    if width > period {
        return Err(CounterError::PulseOutOfRange(width));
    }
    let ccr = if width == period {
        arr + 1
    } else {
        (width / 2) as u16
    };
    Ok(CenterAligned { arr, ccr })
}
