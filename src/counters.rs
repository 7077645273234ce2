//! Readers for the kernel's text counters: `/proc/stat` for CPU ticks and
//! `/proc/meminfo` for memory and swap sizes.
//!
//! Both files are re-opened and read in full on every sample.

use std::fs;
use std::path::Path;

use crate::error::SampleError;

pub const PROC_STAT: &str = "/proc/stat";
pub const PROC_MEMINFO: &str = "/proc/meminfo";

/// Most units (cores or the aggregate) the dock can lay out.
pub const MAX_UNITS: usize = 4;

/// Cumulative tick counters of one unit, as found in `/proc/stat`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CpuCounters {
    pub unit: usize,
    pub user: u64,
    pub nice: u64,
    pub system: u64,
    pub idle: u64,
}

impl CpuCounters {
    pub fn used(&self) -> u64 {
        self.user
            .saturating_add(self.nice)
            .saturating_add(self.system)
    }

    pub fn total(&self) -> u64 {
        self.used().saturating_add(self.idle)
    }
}

/// Memory sizes in kB, as found in `/proc/meminfo`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MemoryState {
    pub total_kb: u32,
    pub free_kb: u32,
    pub cached_kb: u32,
    pub swap_total_kb: u32,
    pub swap_free_kb: u32,
}

pub fn read_cpu_counters(
    path: &Path,
    start_unit: usize,
    aggregate: bool,
) -> Result<Vec<CpuCounters>, SampleError> {
    let text = fs::read_to_string(path)?;
    parse_cpu_counters(&text, start_unit, aggregate)
}

/// Parse the `cpu` lines of `/proc/stat`.
///
/// The first line must be the aggregate line. In aggregate mode it is the
/// only unit returned. Otherwise the per-core lines that follow it are
/// collected, skipping cores below `start_unit`, until a line that is not a
/// core line or until the last of the [`MAX_UNITS`] slots is reached. Offline
/// cores are missing from the file, so unit indices may have gaps.
pub fn parse_cpu_counters(
    text: &str,
    start_unit: usize,
    aggregate: bool,
) -> Result<Vec<CpuCounters>, SampleError> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| SampleError::format("empty stat file"))?;

    let (label, ticks) = split_cpu_line(header)
        .ok_or_else(|| SampleError::format(format!("unparsable stat header {:?}", header)))?;
    if label != "cpu" {
        return Err(SampleError::format(format!(
            "stat header is not the aggregate line: {:?}",
            header
        )));
    }

    if aggregate {
        return Ok(vec![counters_from(0, ticks)]);
    }

    let mut units = Vec::with_capacity(MAX_UNITS);
    for line in lines {
        let Some((label, ticks)) = split_cpu_line(line) else {
            break;
        };
        let Some(core) = label.strip_prefix("cpu").and_then(|n| n.parse::<usize>().ok()) else {
            break;
        };
        if core < start_unit {
            continue;
        }
        let unit = core - start_unit;
        if unit >= MAX_UNITS {
            break;
        }
        units.push(counters_from(unit, ticks));
        if unit == MAX_UNITS - 1 {
            break;
        }
    }
    Ok(units)
}

fn split_cpu_line(line: &str) -> Option<(&str, [u64; 4])> {
    let mut fields = line.split_whitespace();
    let label = fields.next()?;
    if !label.starts_with("cpu") {
        return None;
    }
    let mut ticks = [0u64; 4];
    for slot in ticks.iter_mut() {
        *slot = fields.next()?.parse().ok()?;
    }
    Some((label, ticks))
}

fn counters_from(unit: usize, [user, nice, system, idle]: [u64; 4]) -> CpuCounters {
    CpuCounters {
        unit,
        user,
        nice,
        system,
        idle,
    }
}

pub fn read_meminfo(path: &Path, state: &mut MemoryState) -> Result<usize, SampleError> {
    let text = fs::read_to_string(path)?;
    Ok(parse_meminfo(&text, state))
}

/// Update `state` from `/proc/meminfo` text and return how many of the five
/// tracked fields were found. Fields that are missing keep their old value.
pub fn parse_meminfo(text: &str, state: &mut MemoryState) -> usize {
    let mut found = 0;
    for line in text.lines() {
        if found == 5 {
            break;
        }
        let Some((key, rest)) = line.split_once(':') else {
            continue;
        };
        let slot = match key {
            "MemTotal" => &mut state.total_kb,
            "MemFree" => &mut state.free_kb,
            "Cached" => &mut state.cached_kb,
            "SwapTotal" => &mut state.swap_total_kb,
            "SwapFree" => &mut state.swap_free_kb,
            _ => continue,
        };
        if let Some(value) = rest.split_whitespace().next().and_then(|v| v.parse().ok()) {
            *slot = value;
            found += 1;
        }
    }
    found
}
