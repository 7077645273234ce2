use std::path::PathBuf;

use crate::counters::{self, CpuCounters, MemoryState, MAX_UNITS};
use crate::error::SampleError;

/// Where the kernel counters are read from.
#[derive(Clone, Debug)]
pub struct CounterSources {
    pub stat: PathBuf,
    pub meminfo: PathBuf,
}

impl Default for CounterSources {
    fn default() -> Self {
        Self {
            stat: PathBuf::from(counters::PROC_STAT),
            meminfo: PathBuf::from(counters::PROC_MEMINFO),
        }
    }
}

/// One monitored core, or the aggregate of all cores.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CpuUnit {
    pub idle_ticks: u64,
    pub used_ticks: u64,
    pub instant_load: u32,
    pub decayed_load_accumulator: u32,
}

impl CpuUnit {
    /// Fold a new counter snapshot into the unit and return the load (0-100)
    /// over the ticks elapsed since the previous snapshot.
    pub fn sample(&mut self, counters: &CpuCounters) -> u32 {
        let total_delta = counters
            .total()
            .saturating_sub(self.used_ticks.saturating_add(self.idle_ticks));
        let used_delta = counters.used().saturating_sub(self.used_ticks);

        self.instant_load = if total_delta == 0 {
            0
        } else {
            (used_delta.saturating_mul(100) / total_delta).min(100) as u32
        };
        self.idle_ticks = counters.idle;
        self.used_ticks = counters.used();
        self.decayed_load_accumulator += self.instant_load;
        self.instant_load
    }
}

/// Fixed-capacity table of units keyed by unit index.
#[derive(Clone, Debug, Default)]
pub struct UnitTable {
    units: Vec<CpuUnit>,
}

impl UnitTable {
    pub fn with_len(len: usize) -> Result<Self, SampleError> {
        if len == 0 {
            return Err(SampleError::format("no cpu lines to monitor"));
        }
        if len > MAX_UNITS {
            return Err(SampleError::format(format!(
                "{} units requested, at most {} supported",
                len, MAX_UNITS
            )));
        }
        Ok(Self {
            units: vec![CpuUnit::default(); len],
        })
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn get_mut(&mut self, unit: usize) -> Option<&mut CpuUnit> {
        self.units.get_mut(unit)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CpuUnit> {
        self.units.iter()
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut CpuUnit> {
        self.units.iter_mut()
    }
}

/// Swap usage derived from [`MemoryState`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapUsage {
    /// No swap is configured.
    Absent,
    Used(u32),
}

pub struct LoadModel {
    sources: CounterSources,
    start_unit: usize,
    aggregate: bool,
    units: UnitTable,
    memory: MemoryState,
}

impl LoadModel {
    pub fn new(sources: CounterSources, start_unit: usize, aggregate: bool) -> Self {
        Self {
            sources,
            start_unit,
            aggregate,
            units: UnitTable::default(),
            memory: MemoryState::default(),
        }
    }

    /// First CPU sample. Sizes the unit table up to the highest unit the stat
    /// file lists, so an offline core keeps its slot; finding no units is a
    /// format error.
    pub fn prime(&mut self) -> Result<(), SampleError> {
        let snapshot =
            counters::read_cpu_counters(&self.sources.stat, self.start_unit, self.aggregate)?;
        let len = snapshot.iter().map(|c| c.unit + 1).max().unwrap_or(0);
        self.units = UnitTable::with_len(len)?;
        self.apply(&snapshot);
        Ok(())
    }

    pub fn refresh(&mut self) -> Result<(), SampleError> {
        if self.units.is_empty() {
            return self.prime();
        }
        let snapshot =
            counters::read_cpu_counters(&self.sources.stat, self.start_unit, self.aggregate)?;
        self.apply(&snapshot);
        Ok(())
    }

    fn apply(&mut self, snapshot: &[CpuCounters]) {
        for counters in snapshot {
            if let Some(unit) = self.units.get_mut(counters.unit) {
                unit.sample(counters);
            }
        }
    }

    pub fn refresh_memory(&mut self) -> Result<usize, SampleError> {
        counters::read_meminfo(&self.sources.meminfo, &mut self.memory)
    }

    pub fn units(&self) -> &UnitTable {
        &self.units
    }

    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    pub fn instant_loads(&self) -> Vec<u32> {
        self.units().iter().map(|u| u.instant_load).collect()
    }

    /// Mean load of each unit over a window of `window` samples. Resets the
    /// accumulators.
    pub fn take_averages(&mut self, window: u32) -> Vec<u32> {
        let window = window.max(1);
        self.units
            .iter_mut()
            .map(|u| {
                let avg = (u.decayed_load_accumulator / window).min(100);
                u.decayed_load_accumulator = 0;
                avg
            })
            .collect()
    }

    pub fn memory(&self) -> &MemoryState {
        &self.memory
    }

    pub fn memory_percent(&self) -> u32 {
        memory_percent(&self.memory)
    }

    pub fn swap_percent(&self) -> SwapUsage {
        swap_percent(&self.memory)
    }
}

pub fn memory_percent(mem: &MemoryState) -> u32 {
    let used = mem
        .total_kb
        .saturating_sub(mem.free_kb)
        .saturating_sub(mem.cached_kb);
    percent_of(used, mem.total_kb)
}

pub fn swap_percent(mem: &MemoryState) -> SwapUsage {
    if mem.swap_total_kb == 0 {
        return SwapUsage::Absent;
    }
    let used = mem.swap_total_kb.saturating_sub(mem.swap_free_kb);
    SwapUsage::Used(percent_of(used, mem.swap_total_kb))
}

fn percent_of(used: u32, total: u32) -> u32 {
    match total / 100 {
        0 => 0,
        hundredth => (used / hundredth).min(100),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticks(user: u64, nice: u64, system: u64, idle: u64) -> CpuCounters {
        CpuCounters {
            unit: 0,
            user,
            nice,
            system,
            idle,
        }
    }

    #[test]
    fn test_load_from_tick_delta() {
        let mut unit = CpuUnit::default();
        unit.sample(&ticks(100, 0, 100, 800));
        assert_eq!(unit.instant_load, 20);

        // +30 used, +70 idle
        assert_eq!(unit.sample(&ticks(120, 0, 110, 870)), 30);
        assert_eq!(unit.used_ticks, 230);
        assert_eq!(unit.idle_ticks, 870);
        assert_eq!(unit.decayed_load_accumulator, 50);
    }

    #[test]
    fn test_stalled_ticks_are_zero_load() {
        let mut unit = CpuUnit::default();
        assert_eq!(unit.sample(&ticks(0, 0, 0, 0)), 0);
        unit.sample(&ticks(10, 5, 5, 80));
        assert_eq!(unit.sample(&ticks(10, 5, 5, 80)), 0);
    }

    #[test]
    fn test_load_stays_in_range() {
        let mut unit = CpuUnit::default();
        for step in 1..50u64 {
            let load = unit.sample(&ticks(step * step, step, step * 3, step * 7));
            assert!(load <= 100);
        }
        // Counters going backwards must not underflow.
        let load = unit.sample(&ticks(0, 0, 0, 0));
        assert!(load <= 100);
    }

    #[test]
    fn test_fully_busy_unit() {
        let mut unit = CpuUnit::default();
        assert_eq!(unit.sample(&ticks(50, 25, 25, 0)), 100);
    }

    #[test]
    fn test_unit_table_bounds() {
        assert!(UnitTable::with_len(0).unwrap_err().is_format());
        assert!(UnitTable::with_len(MAX_UNITS + 1).is_err());
        let table = UnitTable::with_len(MAX_UNITS).unwrap();
        assert_eq!(table.len(), MAX_UNITS);
    }

    #[test]
    fn test_memory_percent() {
        let mem = MemoryState {
            total_kb: 1024000,
            free_kb: 256000,
            cached_kb: 128000,
            swap_total_kb: 200000,
            swap_free_kb: 150000,
        };
        // 640000 / 10240
        assert_eq!(memory_percent(&mem), 62);
        assert_eq!(swap_percent(&mem), SwapUsage::Used(25));
    }

    #[test]
    fn test_no_swap_is_absent() {
        let mem = MemoryState {
            total_kb: 1000,
            free_kb: 500,
            ..Default::default()
        };
        assert_eq!(swap_percent(&mem), SwapUsage::Absent);
    }

    #[test]
    fn test_tiny_totals_do_not_divide_by_zero() {
        let mem = MemoryState {
            total_kb: 50,
            free_kb: 10,
            swap_total_kb: 99,
            ..Default::default()
        };
        assert_eq!(memory_percent(&mem), 0);
        assert_eq!(swap_percent(&mem), SwapUsage::Used(0));
        assert_eq!(memory_percent(&MemoryState::default()), 0);
    }

    #[test]
    fn test_take_averages_resets_accumulators() {
        let dir = tempfile::tempdir().unwrap();
        let stat = dir.path().join("stat");
        std::fs::write(&stat, "cpu  0 0 0 0\ncpu0 25 0 25 50\ncpu1 0 0 0 100\n").unwrap();
        let mut model = LoadModel::new(
            CounterSources {
                stat,
                meminfo: dir.path().join("meminfo"),
            },
            0,
            false,
        );
        model.prime().unwrap();
        assert_eq!(model.unit_count(), 2);
        assert_eq!(model.instant_loads(), vec![50, 0]);

        assert_eq!(model.take_averages(10), vec![5, 0]);
        assert!(model
            .units()
            .iter()
            .all(|u| u.decayed_load_accumulator == 0));
    }

    #[test]
    fn test_offline_core_keeps_its_slot() {
        let dir = tempfile::tempdir().unwrap();
        let stat = dir.path().join("stat");
        std::fs::write(&stat, "cpu  100 0 10 90\ncpu0 10 0 10 80\ncpu2 90 0 0 10\n").unwrap();
        let mut model = LoadModel::new(
            CounterSources {
                stat,
                meminfo: dir.path().join("meminfo"),
            },
            0,
            false,
        );
        model.prime().unwrap();
        assert_eq!(model.unit_count(), 3);
        assert_eq!(model.instant_loads(), vec![20, 0, 90]);
    }

    #[test]
    fn test_prime_without_units_fails() {
        let dir = tempfile::tempdir().unwrap();
        let stat = dir.path().join("stat");
        std::fs::write(&stat, "cpu  1 1 1 1\ncpu0 1 1 1 1\n").unwrap();
        let mut model = LoadModel::new(
            CounterSources {
                stat,
                meminfo: dir.path().join("meminfo"),
            },
            3,
            false,
        );
        assert!(model.prime().unwrap_err().is_format());
    }

    #[test]
    fn test_memory_refresh_error_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let meminfo = dir.path().join("meminfo");
        std::fs::write(&meminfo, "MemTotal: 1000 kB\nMemFree: 500 kB\n").unwrap();
        let mut model = LoadModel::new(
            CounterSources {
                stat: dir.path().join("stat"),
                meminfo: meminfo.clone(),
            },
            0,
            true,
        );
        assert_eq!(model.refresh_memory().unwrap(), 2);
        assert_eq!(model.memory_percent(), 50);

        std::fs::remove_file(&meminfo).unwrap();
        assert!(model.refresh_memory().is_err());
        assert_eq!(model.memory_percent(), 50);
        assert_eq!(model.swap_percent(), SwapUsage::Absent);
    }
}
