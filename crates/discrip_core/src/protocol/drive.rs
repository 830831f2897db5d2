//! Drive listing (`DRV:` lines) lookup.

use super::decoder::split_fields;

/// Find MakeMKV's disc index for `device_path` in `info disc:9999` output.
///
/// A drive line looks like:
///
/// ```text
/// DRV:0,2,999,1,"BD-ROM HL-DT-ST","MOVIE","/dev/sr0"
/// ```
///
/// The index is the first field. A line matches when one of its fields
/// is exactly the device path, so `/dev/sr1` never matches `/dev/sr10`.
pub fn find_disc_index<I>(lines: I, device_path: &str) -> Option<u32>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    lines.into_iter().find_map(|line| {
        let (tag, rest) = line.as_ref().split_once(':')?;
        if tag.trim() != "DRV" {
            return None;
        }
        let fields = split_fields(rest);
        if !fields.iter().skip(1).any(|f| f == device_path) {
            return None;
        }
        fields.first()?.parse().ok()
    })
}
