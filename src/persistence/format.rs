//! Binary record definitions.
//!
//! All integers are `i32` and all reals `f32`, both in native byte order.
//! Booleans take one byte. Names are NUL-terminated and prefixed by their
//! byte count including the terminator.

use std::io::{self, Read, Write};

use crate::genetics::{Chromosome, Gene, Genome};
use crate::organism::{Organism, Sensor, State};

/// A value with a fixed binary record layout.
pub trait Record: Sized {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()>;
    fn read_from<R: Read>(r: &mut R) -> io::Result<Self>;
}

fn invalid(msg: impl Into<String>) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg.into())
}

fn write_i32<W: Write>(w: &mut W, v: i32) -> io::Result<()> {
    w.write_all(&v.to_ne_bytes())
}

fn write_f32<W: Write>(w: &mut W, v: f32) -> io::Result<()> {
    w.write_all(&v.to_ne_bytes())
}

fn write_bool<W: Write>(w: &mut W, v: bool) -> io::Result<()> {
    w.write_all(&[v as u8])
}

fn write_count<W: Write>(w: &mut W, n: usize) -> io::Result<()> {
    let n = i32::try_from(n).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("Count {} does not fit the i32 record field", n),
        )
    })?;
    write_i32(w, n)
}

fn read_i32<R: Read>(r: &mut R) -> io::Result<i32> {
    let mut buf4 = [0u8; 4];
    r.read_exact(&mut buf4)?;
    Ok(i32::from_ne_bytes(buf4))
}

fn read_f32<R: Read>(r: &mut R) -> io::Result<f32> {
    let mut buf4 = [0u8; 4];
    r.read_exact(&mut buf4)?;
    Ok(f32::from_ne_bytes(buf4))
}

fn read_bool<R: Read>(r: &mut R) -> io::Result<bool> {
    let mut buf1 = [0u8; 1];
    r.read_exact(&mut buf1)?;
    Ok(buf1[0] != 0)
}

fn read_count<R: Read>(r: &mut R, what: &str) -> io::Result<usize> {
    let n = read_i32(r)?;
    usize::try_from(n).map_err(|_| invalid(format!("Negative {} count: {}", what, n)))
}

/// Read exactly `len` bytes without trusting `len` for the allocation size.
fn read_bytes<R: Read>(r: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut bytes = Vec::new();
    r.by_ref().take(len as u64).read_to_end(&mut bytes)?;
    if bytes.len() != len {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Expected {} bytes, got {}", len, bytes.len()),
        ));
    }
    Ok(bytes)
}

fn write_name<W: Write>(w: &mut W, name: &str) -> io::Result<()> {
    w.write_all(name.as_bytes())?;
    w.write_all(&[0u8])
}

/// Decode a name field of `len` bytes. Anything after the first NUL is dropped.
fn read_name<R: Read>(r: &mut R, len: usize) -> io::Result<String> {
    let mut bytes = read_bytes(r, len)?;
    if let Some(end) = bytes.iter().position(|&b| b == 0) {
        bytes.truncate(end);
    }
    String::from_utf8(bytes).map_err(|e| invalid(format!("Name is not UTF-8: {}", e)))
}

impl Record for Gene {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_count(w, self.len())?;
        write_f32(w, self.mutation_chance())?;
        write_f32(w, self.mutation_rate())?;
        w.write_all(bytemuck::cast_slice(self.coefficients()))
    }

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let len = read_count(r, "coefficient")?;
        let mutation_chance = read_f32(r)?;
        let mutation_rate = read_f32(r)?;

        let byte_len = len
            .checked_mul(4)
            .ok_or_else(|| invalid(format!("Coefficient count {} too large", len)))?;
        let bytes = read_bytes(r, byte_len)?;
        let coefficients = bytes
            .chunks_exact(4)
            .map(bytemuck::pod_read_unaligned::<f32>)
            .collect();

        Ok(Gene::from_parts(coefficients, mutation_chance, mutation_rate))
    }
}

impl Record for Chromosome {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_count(w, self.len())?;
        write_bool(w, self.recombination_enabled())?;
        write_f32(w, self.recombination_mutation_chance())?;
        for gene in self.genes() {
            gene.write_to(w)?;
        }
        Ok(())
    }

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let count = read_count(r, "gene")?;
        let recombination_enabled = read_bool(r)?;
        let recombination_mutation_chance = read_f32(r)?;

        let genes = (0..count)
            .map(|_| Gene::read_from(r))
            .collect::<io::Result<Vec<_>>>()?;

        Ok(Chromosome::from_parts(
            genes,
            recombination_enabled,
            recombination_mutation_chance,
        ))
    }
}

impl Record for Genome {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_count(w, self.len())?;
        for chromosome in self.chromosomes() {
            chromosome.write_to(w)?;
        }
        Ok(())
    }

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let count = read_count(r, "chromosome")?;
        let chromosomes = (0..count)
            .map(|_| Chromosome::read_from(r))
            .collect::<io::Result<Vec<_>>>()?;
        Ok(Genome::from_chromosomes(chromosomes))
    }
}

impl Record for State {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_count(w, self.name.len() + 1)?;
        write_name(w, &self.name)
    }

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let len = read_count(r, "name byte")?;
        Ok(State {
            name: read_name(r, len)?,
        })
    }
}

impl Record for Sensor {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_count(w, self.name.len() + 1)?;
        write_f32(w, self.value)?;
        write_name(w, &self.name)
    }

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let len = read_count(r, "name byte")?;
        let value = read_f32(r)?;
        Ok(Sensor {
            name: read_name(r, len)?,
            value,
        })
    }
}

impl Record for Organism {
    fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
        write_count(w, self.state_count())?;
        write_count(w, self.sensor_count())?;
        write_count(w, self.current_state())?;

        // Slots the name tables never allocated are written as blank labels.
        let blank_state = State::default();
        for i in 0..self.state_count() {
            self.states().get(i).unwrap_or(&blank_state).write_to(w)?;
        }
        let blank_sensor = Sensor::default();
        for i in 0..self.sensor_count() {
            self.sensors().get(i).unwrap_or(&blank_sensor).write_to(w)?;
        }

        self.genome().write_to(w)
    }

    fn read_from<R: Read>(r: &mut R) -> io::Result<Self> {
        let state_count = read_count(r, "state")?;
        let sensor_count = read_count(r, "sensor")?;
        let current_state = read_count(r, "current state")?;

        if state_count > 0 && current_state >= state_count {
            return Err(invalid(format!(
                "Current state {} out of range for {} states",
                current_state, state_count
            )));
        }

        let states = (0..state_count)
            .map(|_| State::read_from(r))
            .collect::<io::Result<Vec<_>>>()?;
        let sensors = (0..sensor_count)
            .map(|_| Sensor::read_from(r))
            .collect::<io::Result<Vec<_>>>()?;
        let genome = Genome::read_from(r)?;

        let square = genome.len() == state_count
            && genome.chromosomes().iter().all(|c| {
                c.len() == state_count && c.genes().iter().all(|g| g.len() == 1 + sensor_count)
            });
        if !square {
            log::warn!(
                "loaded genome does not match {} states x {} sensors",
                state_count,
                sensor_count
            );
        }

        Ok(Organism::from_parts(states, sensors, current_state, genome))
    }
}
