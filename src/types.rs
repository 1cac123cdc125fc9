use crate::error::{CpuGenError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One candidate hardware configuration in the search space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CpuVariant {
    pub clock_speed: f64, // MHz
    pub memory_size: i64, // bytes
}

impl CpuVariant {
    pub fn new(clock_speed: f64, memory_size: i64) -> Self {
        Self {
            clock_speed,
            memory_size,
        }
    }
}

impl fmt::Display for CpuVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Clock Speed: {:.4} MHz, Memory Size: {} bytes",
            self.clock_speed, self.memory_size
        )
    }
}

/// Instruction mnemonics a design can expose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Opcode {
    Lda, // load accumulator
    Sta, // store accumulator
    Adc, // add with carry
    Sbc, // subtract with carry
    Nop,
}

impl Opcode {
    pub const ALL: [Opcode; 5] = [Opcode::Lda, Opcode::Sta, Opcode::Adc, Opcode::Sbc, Opcode::Nop];

    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Lda => "LDA",
            Opcode::Sta => "STA",
            Opcode::Adc => "ADC",
            Opcode::Sbc => "SBC",
            Opcode::Nop => "NOP",
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// RAM/ROM split of a design's total memory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryMap {
    pub ram: i64,
    pub rom: i64,
}

impl MemoryMap {
    /// Split `total` bytes so that `ram + rom == total`.
    pub fn split(total: i64, ram: i64) -> Result<Self> {
        if ram < 0 || ram > total {
            return Err(CpuGenError::Configuration(format!(
                "RAM size {} does not fit in {} bytes of memory",
                ram, total
            )));
        }
        Ok(Self {
            ram,
            rom: total - ram,
        })
    }

    pub fn total(&self) -> i64 {
        self.ram + self.rom
    }
}

/// Extended variant produced by the one-shot design generators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpuDesign {
    pub clock_speed: f64,
    pub opcodes: Vec<Opcode>,
    pub memory_size: i64,
    pub memory_map: MemoryMap,
}

impl CpuDesign {
    /// Project onto the fields the evolution engine searches over.
    pub fn variant(&self) -> CpuVariant {
        CpuVariant::new(self.clock_speed, self.memory_size)
    }

    pub fn has_opcode(&self, opcode: Opcode) -> bool {
        self.opcodes.contains(&opcode)
    }
}

impl fmt::Display for CpuDesign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Clock Speed: {:.4} MHz", self.clock_speed)?;
        let opcodes: Vec<&str> = self.opcodes.iter().map(Opcode::mnemonic).collect();
        writeln!(f, "Opcodes: {}", opcodes.join(" "))?;
        writeln!(f, "Memory Size: {} bytes", self.memory_size)?;
        write!(
            f,
            "Memory Map: RAM = {} bytes, ROM = {} bytes",
            self.memory_map.ram, self.memory_map.rom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_map_split() {
        let map = MemoryMap::split(8192, 1024).unwrap();
        assert_eq!(map.ram, 1024);
        assert_eq!(map.rom, 7168);
        assert_eq!(map.total(), 8192);
    }

    #[test]
    fn test_memory_map_rejects_oversized_ram() {
        assert!(MemoryMap::split(4096, 4097).is_err());
        assert!(MemoryMap::split(4096, -1).is_err());
    }

    #[test]
    fn test_design_display() {
        let design = CpuDesign {
            clock_speed: 2.0,
            opcodes: vec![Opcode::Lda, Opcode::Sta, Opcode::Nop],
            memory_size: 8192,
            memory_map: MemoryMap::split(8192, 1024).unwrap(),
        };

        let text = design.to_string();
        assert!(text.contains("Opcodes: LDA STA NOP"));
        assert!(text.contains("RAM = 1024 bytes, ROM = 7168 bytes"));
        assert_eq!(design.variant(), CpuVariant::new(2.0, 8192));
        assert!(design.has_opcode(Opcode::Nop));
        assert!(!design.has_opcode(Opcode::Adc));
    }
}
