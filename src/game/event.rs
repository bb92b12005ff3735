//! Event queues
//!
//! Gameplay systems never call the HUD or audio directly. They push events
//! into queues owned by the orchestrator, and whoever cares reads them after
//! the tick. Queues are cleared when the next tick starts.
//!
//! Example flow:
//! 1. Collectible check sees an overlap, despawns the box, sends CollectedEvent
//! 2. HUD reads the event and flashes the counter
//! 3. Camera reveal finishes, orchestrator sends PortalEvent::Opened

use crate::rasterizer::Vec2;

/// A queue for events of a single type.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera lifecycle notifications. Ambient audio hooks key off these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCue {
    TransitionStarted,
    TransitionFinished,
    /// Focus zoom reached its peak; the portal opens on this cue
    Reveal,
    ZoomReset,
}

/// A collectible was picked up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectedEvent {
    pub position: Vec2,
    /// Total collected this attempt, after this pickup
    pub total: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageSource {
    Hazard,
    Hostile,
    FellOut,
}

/// The player took a hit and survived it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub source: DamageSource,
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefeatCause {
    Hit(DamageSource),
    TimeUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalEvent {
    Opened,
    Entered,
}

/// Container for all game events.
pub struct GameEvents {
    pub collected: EventQueue<CollectedEvent>,
    pub damaged: EventQueue<DamageEvent>,
    pub defeated: EventQueue<DefeatCause>,
    pub portal: EventQueue<PortalEvent>,
    pub cues: EventQueue<CameraCue>,
    /// (from, to) for every phase change
    pub phases: EventQueue<(super::Phase, super::Phase)>,
}

impl GameEvents {
    pub fn new() -> Self {
        Self {
            collected: EventQueue::new(),
            damaged: EventQueue::new(),
            defeated: EventQueue::new(),
            portal: EventQueue::new(),
            cues: EventQueue::new(),
            phases: EventQueue::new(),
        }
    }

    pub fn clear_all(&mut self) {
        self.collected.clear();
        self.damaged.clear();
        self.defeated.clear();
        self.portal.clear();
        self.cues.clear();
        self.phases.clear();
    }
}

impl Default for GameEvents {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_queue() {
        let mut queue: EventQueue<i32> = EventQueue::new();
        queue.send(1);
        queue.send(2);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.iter().copied().collect::<Vec<_>>(), vec![1, 2]);

        let drained: Vec<_> = queue.drain().collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_clear_all() {
        let mut events = GameEvents::new();
        events.cues.send(CameraCue::Reveal);
        events.portal.send(PortalEvent::Opened);
        events.clear_all();
        assert!(events.cues.is_empty());
        assert!(events.portal.is_empty());
    }
}
