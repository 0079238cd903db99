//! Hardware information collection (host model, memory)

use crate::config::Context;
use crate::data::{Fact, OsFamily};
use crate::error::{PfetchError, Result};
use crate::utils::{command::*, file::*, parsing::*};

const DMI_PRODUCT_NAME: &str = "/sys/devices/virtual/dmi/id/product_name";
const DMI_PRODUCT_VERSION: &str = "/sys/devices/virtual/dmi/id/product_version";
const DEVICE_TREE_MODEL: &str = "/sys/firmware/devicetree/base/model";
const MEMINFO: &str = "/proc/meminfo";

/// Placeholder words vendors leave in DMI fields
const OEM_PLACEHOLDERS: &[&str] = &[
    "To", "Be", "be", "Filled", "filled", "By", "by", "O.E.M.", "OEM", "Not", "Applicable",
    "Specified", "System", "Product", "Name", "Version", "Undefined", "Default", "string",
    "INVALID", "\u{fffd}", "os",
];

pub fn host(ctx: &Context) -> Option<Fact> {
    let family = ctx.host.family();
    let raw = if family == OsFamily::Linux {
        [DMI_PRODUCT_NAME, DMI_PRODUCT_VERSION, DEVICE_TREE_MODEL]
            .iter()
            .filter_map(read_attribute)
            .collect::<Vec<_>>()
            .join(" ")
    } else if family.is_bsd() {
        sysctl(ctx, "hw.model").unwrap_or_else(|err| {
            tracing::debug!(%err, "hw.model unavailable");
            String::new()
        })
    } else {
        String::new()
    };

    Some(host_fact(&raw, &ctx.host.machine))
}

/// Host fact from a raw model string, falling back to the architecture
pub fn host_fact(raw: &str, machine: &str) -> Fact {
    let model = clean_host(raw);
    if model.is_empty() {
        return Fact::new("host", machine);
    }
    Fact::new("host", model)
}

/// Drop OEM placeholder tokens, keeping the rest in order
pub fn clean_host(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|word| !OEM_PLACEHOLDERS.contains(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Used and total memory in MiB; `None` when it could not be determined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryUsage {
    pub used_mib: Option<u64>,
    pub total_mib: Option<u64>,
}

impl MemoryUsage {
    /// `<used>M / <total>M` with `?` for unknown parts
    pub fn format(&self) -> String {
        let part = |v: Option<u64>| v.map_or_else(|| "?".to_string(), |v| v.to_string());
        format!("{}M / {}M", part(self.used_mib), part(self.total_mib))
    }
}

pub fn memory(ctx: &Context) -> Option<Fact> {
    let usage = match ctx.host.family() {
        OsFamily::Linux => read_file_safe(MEMINFO).map(|content| parse_meminfo(&content)),
        OsFamily::FreeBsd | OsFamily::DragonFly => freebsd_memory(ctx),
        OsFamily::OpenBsd => openbsd_memory(ctx),
        OsFamily::NetBsd => netbsd_memory(ctx),
        OsFamily::Other => Err(PfetchError::Detection("unsupported OS".to_string())),
    }
    .unwrap_or_else(|err| {
        tracing::debug!(%err, "memory unavailable");
        MemoryUsage::default()
    });

    Some(Fact::new("memory", usage.format()))
}

/// Parse `/proc/meminfo`, preferring `MemAvailable` when the kernel reports it
pub fn parse_meminfo(content: &str) -> MemoryUsage {
    let mut used: i128 = 0;
    let mut total = None;
    let mut available = None;

    for line in content.lines() {
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let Some(kib) = rest.split_whitespace().next().and_then(|v| v.parse::<u64>().ok()) else {
            continue;
        };

        match key.trim() {
            "MemTotal" => {
                used += i128::from(kib);
                total = Some(kib);
            }
            "Shmem" => used += i128::from(kib),
            "MemFree" | "Buffers" | "Cached" | "SReclaimable" => used -= i128::from(kib),
            "MemAvailable" => available = Some(kib),
            _ => {}
        }
    }

    let used_kib = match (total, available) {
        (Some(total), Some(available)) => total.saturating_sub(available),
        _ => u64::try_from(used.max(0)).unwrap_or(0),
    };

    MemoryUsage {
        used_mib: total.map(|_| kib_to_mib(used_kib)),
        total_mib: total.map(kib_to_mib),
    }
}

fn sysctl_u64(ctx: &Context, name: &str) -> Result<u64> {
    let raw = sysctl(ctx, name)?;
    raw.trim()
        .parse()
        .map_err(|_| PfetchError::Parse(format!("{}: {}", name, raw)))
}

fn freebsd_memory(ctx: &Context) -> Result<MemoryUsage> {
    let total = sysctl_u64(ctx, "hw.physmem")?;
    let page_size = sysctl_u64(ctx, "hw.pagesize")?;
    // v_cache_count no longer exists on recent FreeBSD.
    let pages = ["vm.stats.vm.v_inactive_count", "vm.stats.vm.v_free_count", "vm.stats.vm.v_cache_count"]
        .iter()
        .map(|name| sysctl_u64(ctx, name).unwrap_or(0))
        .sum::<u64>();

    Ok(freebsd_usage(total, page_size, pages))
}

/// Used = physical memory minus inactive, free and cached pages
pub fn freebsd_usage(total_bytes: u64, page_size: u64, reclaimable_pages: u64) -> MemoryUsage {
    let reclaimable = reclaimable_pages.saturating_mul(page_size);
    MemoryUsage {
        used_mib: Some(bytes_to_mib(total_bytes.saturating_sub(reclaimable))),
        total_mib: Some(bytes_to_mib(total_bytes)),
    }
}

fn openbsd_memory(ctx: &Context) -> Result<MemoryUsage> {
    let total = sysctl_u64(ctx, "hw.physmem").ok().map(bytes_to_mib);
    let used = run_command(ctx, "vmstat", &[])
        .ok()
        .and_then(|out| parse_vmstat_used(&out));
    Ok(MemoryUsage {
        used_mib: used,
        total_mib: total,
    })
}

/// Third field of vmstat's last line (active virtual memory, `123M`)
pub fn parse_vmstat_used(output: &str) -> Option<u64> {
    output
        .lines()
        .rev()
        .find(|line| !line.trim().is_empty())?
        .split_whitespace()
        .nth(2)?
        .trim_end_matches('M')
        .parse()
        .ok()
}

fn netbsd_memory(ctx: &Context) -> Result<MemoryUsage> {
    let total = sysctl_u64(ctx, "hw.physmem64").ok().map(bytes_to_mib);
    let used = read_file_safe(MEMINFO)
        .ok()
        .and_then(|content| parse_meminfo(&content).used_mib);
    Ok(MemoryUsage {
        used_mib: used,
        total_mib: total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_host_is_emptied() {
        assert_eq!(clean_host("To Be Filled By O.E.M."), "");
        assert_eq!(clean_host("System Product Name System Version"), "");
    }

    #[test]
    fn placeholder_host_falls_back_to_machine() {
        assert_eq!(host_fact("To Be Filled By O.E.M.", "x86_64"), Fact::new("host", "x86_64"));
        assert_eq!(host_fact("", "aarch64").value, "aarch64");
        assert_eq!(host_fact("Default string Z390 AORUS", "x86_64").value, "Z390 AORUS");
    }

    #[test]
    fn host_keeps_real_tokens_in_order() {
        assert_eq!(clean_host("ThinkPad  T480   Not Specified"), "ThinkPad T480");
        assert_eq!(clean_host("MS-7B86 1.0 Default string"), "MS-7B86 1.0");
    }

    #[test]
    fn meminfo_prefers_available() {
        let content = "MemTotal:        1048576 kB\nMemFree:          100000 kB\nMemAvailable:     524288 kB\n";
        assert_eq!(parse_meminfo(content).format(), "512M / 1024M");
    }

    #[test]
    fn meminfo_without_available_uses_accumulated_estimate() {
        let content = "\
MemTotal:        2097152 kB
MemFree:          524288 kB
Buffers:          102400 kB
Cached:           307200 kB
Shmem:             51200 kB
SReclaimable:      65536 kB
";
        // 2097152 + 51200 - 524288 - 102400 - 307200 - 65536 = 1148928 kB
        let usage = parse_meminfo(content);
        assert_eq!(usage.used_mib, Some(1122));
        assert_eq!(usage.total_mib, Some(2048));
    }

    #[test]
    fn unknown_memory_uses_placeholders() {
        assert_eq!(parse_meminfo("").format(), "?M / ?M");
        let partial = MemoryUsage {
            used_mib: None,
            total_mib: Some(4096),
        };
        assert_eq!(partial.format(), "?M / 4096M");
    }

    #[test]
    fn freebsd_formula() {
        let usage = freebsd_usage(8 * 1024 * 1024 * 1024, 4096, 262_144);
        assert_eq!(usage.format(), "7168M / 8192M");
    }

    #[test]
    fn vmstat_last_line() {
        let out = " r s   avm     fre  flt\n 1 46  912M  6104M  120\n";
        assert_eq!(parse_vmstat_used(out), Some(912));
        assert_eq!(parse_vmstat_used(""), None);
    }
}
