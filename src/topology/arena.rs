//! Dense slot storage with generational reuse.
//!
//! Entities live in a `Vec` of slots; removing one frees the slot for reuse
//! and bumps its generation, so handles to the old occupant stop resolving.
//! A slot whose generation reaches `u32::MAX` is retired instead of reused,
//! so a generation is never handed out twice for the same slot.

#[derive(Clone, Debug)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            live: 0,
        }
    }
}

impl<T> Arena<T> {
    /// Stores `value` and returns its `(index, generation)`.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` slots would be needed.
    pub(crate) fn insert(&mut self, value: T) -> (u32, u32) {
        self.live += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.value = Some(value);
            return (index, slot.generation);
        }
        let index = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
            panic!("arena exhausted: more than {} live slots", u32::MAX)
        });
        self.slots.push(Slot {
            generation: 0,
            value: Some(value),
        });
        (index, 0)
    }

    #[inline]
    pub(crate) fn get(&self, (index, generation): (u32, u32)) -> Option<&T> {
        self.slots
            .get(index as usize)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_ref())
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, (index, generation): (u32, u32)) -> Option<&mut T> {
        self.slots
            .get_mut(index as usize)
            .filter(|slot| slot.generation == generation)
            .and_then(|slot| slot.value.as_mut())
    }

    pub(crate) fn remove(&mut self, (index, generation): (u32, u32)) -> Option<T> {
        let slot = self.slots.get_mut(index as usize)?;
        if slot.generation != generation {
            return None;
        }
        let value = slot.value.take()?;
        self.live -= 1;
        match slot.generation.checked_add(1) {
            Some(next) => {
                slot.generation = next;
                self.free.push(index);
            }
            None => log::debug!("arena slot {index} exhausted its generations; retiring it"),
        }
        Some(value)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.live
    }

    /// Live entries as `((index, generation), value)` in slot order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = ((u32, u32), &T)> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.value
                .as_ref()
                .map(|value| ((i as u32, slot.generation), value))
        })
    }
}
