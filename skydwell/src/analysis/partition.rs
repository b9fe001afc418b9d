//! Sample partitioning by ground state and airspace membership.

use serde::Serialize;

use crate::airspace::AirspaceVolume;
use crate::phase::ClassifiedFlight;

/// Sample indices of a flight grouped by where the aircraft was.
///
/// A sample inside overlapping volumes is listed under each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// Samples reported on the ground.
    pub ground: Vec<usize>,
    /// Samples inside each volume, in configuration order.
    pub volumes: Vec<(String, Vec<usize>)>,
    /// Airborne samples outside every volume.
    pub outside: Vec<usize>,
}

impl Partition {
    /// Indices inside a volume by name.
    pub fn in_volume(&self, name: &str) -> Option<&[usize]> {
        self.volumes
            .iter()
            .find(|(volume, _)| volume == name)
            .map(|(_, indices)| indices.as_slice())
    }
}

impl ClassifiedFlight {
    /// Group samples into ground, per-volume and outside sets.
    pub fn partition(&self, volumes: &[AirspaceVolume]) -> Partition {
        let mut partition = Partition {
            volumes: volumes
                .iter()
                .map(|v| (v.name().to_string(), Vec::new()))
                .collect(),
            ..Partition::default()
        };

        for sample in self.samples() {
            let mut inside_any = false;
            for (volume, (_, indices)) in volumes.iter().zip(partition.volumes.iter_mut()) {
                if volume.contains(sample.position, sample.altitude_ft) {
                    indices.push(sample.index);
                    inside_any = true;
                }
            }

            if sample.is_on_ground() {
                partition.ground.push(sample.index);
            } else if !inside_any {
                partition.outside.push(sample.index);
            }
        }

        partition
    }
}
