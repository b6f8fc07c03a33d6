//! Group index: voxel indices clustered by their group id.
//!
//! The index is derived data. It is rebuilt every time a scene is loaded and
//! thrown away with the scene. Each group remembers, per member, the member's
//! generation-time Y coordinate as the baseline for animation, plus a random
//! phase that desynchronises the bobbing of different objects.

use std::{collections::HashMap, f32::consts::TAU, ops::Range};

use rand::Rng;

use crate::data_structures::voxel::{GroupId, Voxel};

/// A named cluster of voxels animated and picked as one object.
#[derive(Clone, Debug)]
pub struct Group {
    pub id: GroupId,
    pub members: Vec<usize>,
    pub base_y: Vec<i32>,
    /// Phase offset in `[0, 2π)`; always `0.0` for the reserved groups.
    pub phase: f32,
}

/// All groups of one voxel sequence, in first-encounter order.
#[derive(Clone, Debug, Default)]
pub struct GroupIndex {
    groups: Vec<Group>,
    lookup: HashMap<GroupId, usize>,
    runs: Vec<Range<usize>>,
    voxel_count: usize,
}

impl GroupIndex {
    /// Single pass over `voxels`. A group record is allocated on the first
    /// encounter of its id and every encounter appends the voxel's index.
    pub fn build<R: Rng + ?Sized>(voxels: &[Voxel], rng: &mut R) -> Self {
        let mut index = GroupIndex {
            voxel_count: voxels.len(),
            ..Default::default()
        };
        for (idx, voxel) in voxels.iter().enumerate() {
            let Some(id) = &voxel.group else {
                continue;
            };
            let slot = match index.lookup.get(id) {
                Some(&slot) => slot,
                None => {
                    let phase = if id.bobs() { rng.gen_range(0.0..TAU) } else { 0.0 };
                    index.groups.push(Group {
                        id: id.clone(),
                        members: Vec::new(),
                        base_y: Vec::new(),
                        phase,
                    });
                    index.lookup.insert(id.clone(), index.groups.len() - 1);
                    index.groups.len() - 1
                }
            };
            let group = &mut index.groups[slot];
            group.members.push(idx);
            group.base_y.push(voxel.position.y);

            match index.runs.last_mut() {
                Some(run) if run.end == idx => run.end += 1,
                _ => index.runs.push(idx..idx + 1),
            }
        }
        index
    }

    pub fn get(&self, id: &GroupId) -> Option<&Group> {
        self.lookup.get(id).map(|&slot| &self.groups[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Length of the voxel sequence this index was built from.
    pub fn voxel_count(&self) -> usize {
        self.voxel_count
    }

    /// Ascending, non-overlapping index ranges that together cover every
    /// grouped voxel and nothing else. Every group animates, so these are the
    /// only instances that change after load.
    pub fn animated_runs(&self) -> &[Range<usize>] {
        &self.runs
    }

    /// Number of voxels that belong to some group.
    pub fn grouped_count(&self) -> usize {
        self.runs.iter().map(|run| run.len()).sum()
    }

    pub fn fire(&self) -> Option<&Group> {
        self.get(&GroupId::Fire)
    }

    pub fn character(&self) -> Option<&Group> {
        self.get(&GroupId::Character)
    }

    /// Groups that take part in the shared bobbing, i.e. everything except the
    /// fire and the character.
    pub fn bobbing(&self) -> impl Iterator<Item = &Group> {
        self.groups.iter().filter(|group| group.id.bobs())
    }
}
