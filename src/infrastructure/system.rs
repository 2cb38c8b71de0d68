//! Memory and battery readout for the settings footer.
//!
//! Values come from `/proc/meminfo` and the power-supply class in sysfs.
//! Anything unavailable renders as `--`.

use std::path::Path;

const MEMINFO: &str = "/proc/meminfo";
const POWER_SUPPLY: &str = "/sys/class/power_supply";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SystemReadout {
    /// `(used, total)` in MiB.
    pub memory_mib: Option<(u64, u64)>,
    pub battery_percent: Option<u8>,
}

impl SystemReadout {
    /// Reads the current values from the host.
    #[must_use]
    pub fn sample() -> Self {
        let memory_mib = std::fs::read_to_string(MEMINFO).ok().and_then(|text| parse_meminfo(&text));
        Self {
            memory_mib,
            battery_percent: read_battery(Path::new(POWER_SUPPLY)),
        }
    }

    /// Footer text, e.g. `MEM: 512MB / 2048MB | BAT: 87%`.
    #[must_use]
    pub fn footer(&self) -> String {
        let memory = self
            .memory_mib
            .map_or_else(|| "--".to_string(), |(used, total)| format!("{used}MB / {total}MB"));
        let battery = self
            .battery_percent
            .map_or_else(|| "--".to_string(), |percent| format!("{percent}%"));
        format!("MEM: {memory} | BAT: {battery}")
    }
}

fn parse_meminfo(text: &str) -> Option<(u64, u64)> {
    let field = |name: &str| {
        text.lines()
            .find_map(|line| line.strip_prefix(name))
            .and_then(|rest| rest.trim_start_matches(':').split_whitespace().next())
            .and_then(|kib| kib.parse::<u64>().ok())
    };
    let total = field("MemTotal")?;
    let available = field("MemAvailable").or_else(|| field("MemFree"))?;
    Some((total.saturating_sub(available) / 1024, total / 1024))
}

fn read_battery(power_supply: &Path) -> Option<u8> {
    let entries = std::fs::read_dir(power_supply).ok()?;
    entries
        .filter_map(Result::ok)
        .filter(|entry| {
            std::fs::read_to_string(entry.path().join("type"))
                .is_ok_and(|kind| kind.trim() == "Battery")
        })
        .find_map(|entry| {
            std::fs::read_to_string(entry.path().join("capacity"))
                .ok()
                .and_then(|text| text.trim().parse::<u8>().ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_meminfo() {
        let text = "MemTotal:        2048000 kB\nMemFree:          100000 kB\nMemAvailable:    1024000 kB\n";
        assert_eq!(parse_meminfo(text), Some((1000, 2000)));
        assert_eq!(parse_meminfo("garbage"), None);
    }

    #[test]
    fn reads_first_battery() {
        let dir = tempfile::tempdir().unwrap();
        let ac = dir.path().join("AC");
        let bat = dir.path().join("BAT0");
        std::fs::create_dir_all(&ac).unwrap();
        std::fs::create_dir_all(&bat).unwrap();
        std::fs::write(ac.join("type"), "Mains\n").unwrap();
        std::fs::write(bat.join("type"), "Battery\n").unwrap();
        std::fs::write(bat.join("capacity"), "87\n").unwrap();

        assert_eq!(read_battery(dir.path()), Some(87));
        assert_eq!(read_battery(&dir.path().join("missing")), None);
    }

    #[test]
    fn footer_falls_back_to_dashes() {
        assert_eq!(SystemReadout::default().footer(), "MEM: -- | BAT: --");
        let readout = SystemReadout {
            memory_mib: Some((512, 2048)),
            battery_percent: Some(87),
        };
        assert_eq!(readout.footer(), "MEM: 512MB / 2048MB | BAT: 87%");
    }
}
