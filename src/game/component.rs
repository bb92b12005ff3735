//! Generation-checked component storage
//!
//! `ComponentStorage<T>` hands out an `Entity` for every value it stores.
//! Lookups and removals compare generations, so a handle whose value was
//! already removed resolves to nothing, even after its slot is reused.
//! Slots are recycled LIFO.

use super::entity::Entity;

struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

pub struct ComponentStorage<T> {
    slots: Vec<Slot<T>>,
    free: Vec<u32>,
    live: usize,
}

impl<T> ComponentStorage<T> {
    pub fn new() -> Self {
        Self { slots: Vec::new(), free: Vec::new(), live: 0 }
    }

    /// Store `value` and return its handle
    pub fn spawn(&mut self, value: T) -> Entity {
        self.live += 1;
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index as usize];
                slot.value = Some(value);
                Entity::new(index, slot.generation)
            }
            None => {
                let index = self.slots.len() as u32;
                self.slots.push(Slot { generation: 0, value: Some(value) });
                Entity::new(index, 0)
            }
        }
    }

    fn slot(&self, entity: Entity) -> Option<&Slot<T>> {
        self.slots
            .get(entity.index() as usize)
            .filter(|s| s.generation == entity.generation())
    }

    /// Remove and return the value. Only the first call for a handle
    /// returns Some.
    pub fn despawn(&mut self, entity: Entity) -> Option<T> {
        let slot = self.slots.get_mut(entity.index() as usize)?;
        if slot.generation != entity.generation() {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = entity.next_generation().generation();
        self.free.push(entity.index());
        self.live -= 1;
        Some(value)
    }

    pub fn get(&self, entity: Entity) -> Option<&T> {
        self.slot(entity).and_then(|s| s.value.as_ref())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.get(entity).is_some()
    }

    /// Live (handle, value) pairs in slot order
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.slots.iter().enumerate().filter_map(|(i, s)| {
            s.value.as_ref().map(|v| (Entity::new(i as u32, s.generation), v))
        })
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }
}

impl<T> Default for ComponentStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_despawn_only_once() {
        let mut storage = ComponentStorage::new();
        let e = storage.spawn("shard");
        assert_eq!(storage.despawn(e), Some("shard"));
        assert_eq!(storage.despawn(e), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_stale_handle_after_reuse() {
        let mut storage = ComponentStorage::new();
        let old = storage.spawn(1);
        storage.despawn(old);

        // Reuses slot 0 with a new generation
        let new = storage.spawn(2);
        assert_eq!(new.index(), old.index());
        assert_ne!(new.generation(), old.generation());

        assert_eq!(storage.get(old), None);
        assert_eq!(storage.despawn(old), None);
        assert_eq!(storage.get(new), Some(&2));
        assert_eq!(storage.len(), 1);
    }

    #[test]
    fn test_iter_skips_removed() {
        let mut storage = ComponentStorage::new();
        let a = storage.spawn('a');
        let b = storage.spawn('b');
        let c = storage.spawn('c');
        storage.despawn(b);

        let live: Vec<(Entity, char)> = storage.iter().map(|(e, v)| (e, *v)).collect();
        assert_eq!(live, vec![(a, 'a'), (c, 'c')]);
        assert!(!storage.is_alive(Entity::new(99, 0)));
    }
}
