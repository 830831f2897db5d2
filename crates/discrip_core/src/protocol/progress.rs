//! Progress (`PRGV:`) lines.

/// Parse a `PRGV:current,total,max` line into whole-job percent.
///
/// Returns `None` for other lines or a zero maximum.
pub fn parse_progress(line: &str) -> Option<u32> {
    let rest = line.strip_prefix("PRGV:")?;
    let mut fields = rest.split(',').map(|f| f.trim().parse::<u64>());

    let _current = fields.next()?.ok()?;
    let total = fields.next()?.ok()?;
    let max = fields.next()?.ok()?;
    if max == 0 {
        return None;
    }

    // widened so full 64-bit counters cannot overflow; result is 0..=100
    let percent = u128::from(total.min(max)) * 100 / u128::from(max);
    u32::try_from(percent).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_total_progress() {
        assert_eq!(parse_progress("PRGV:100,32768,65536"), Some(50));
        assert_eq!(parse_progress("PRGV:0,65536,65536"), Some(100));
        assert_eq!(parse_progress("PRGV:0,0,65536"), Some(0));
    }

    #[test]
    fn ignores_other_lines() {
        assert_eq!(parse_progress("PRGC:5018,0,\"Saving to MKV file\""), None);
        assert_eq!(parse_progress("PRGV:1,2,0"), None);
        assert_eq!(parse_progress("PRGV:x,y,z"), None);
        assert_eq!(parse_progress("TCOUNT:3"), None);
    }

    #[test]
    fn huge_counters_do_not_overflow() {
        let line = format!("PRGV:0,{},{}", u64::MAX, u64::MAX);
        assert_eq!(parse_progress(&line), Some(100));
        let line = format!("PRGV:0,{},{}", u64::MAX / 2, u64::MAX);
        assert_eq!(parse_progress(&line), Some(49));
    }
}
