//! In-Memory Repository Implementations
//!
//! One shared store, handed out as three repository views plus a unit of
//! work. All views see the same data, so a rollback restores ninjas,
//! missions and villages together.
//! Useful for testing, demos and seeding.

use std::collections::BTreeMap;
use std::sync::{
    Arc, Condvar, Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard,
};
use std::thread::{self, ThreadId};

use kage_domain::{
    Mission, MissionId, MissionRepository, Ninja, NinjaId, NinjaRepository, RepositoryError,
    UnitOfWork, Village, VillageId, VillageRepository,
};

#[derive(Debug, Clone, Default)]
struct StoreState {
    ninjas: BTreeMap<NinjaId, Ninja>,
    missions: BTreeMap<MissionId, Mission>,
    villages: BTreeMap<VillageId, Village>,
    last_ninja: u64,
    last_mission: u64,
    last_village: u64,
}

/// The open unit of work, if any
#[derive(Debug, Default)]
struct Turn {
    owner: Option<ThreadId>,
    /// State as of `begin`
    snapshot: Option<StoreState>,
}

/// Admission to the store: while a unit of work is open, only the thread
/// that opened it gets in; everyone else waits for `released`.
#[derive(Debug, Default)]
struct Gate {
    turn: Mutex<Turn>,
    released: Condvar,
}

/// In-memory store
///
/// Thread-safe implementation using RwLock. Cloning shares the data.
/// Units of work are serialized: other threads block until the open one
/// commits or rolls back, so they never observe uncommitted writes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
    gate: Arc<Gate>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn missions(&self) -> InMemoryMissionRepository {
        InMemoryMissionRepository {
            store: self.clone(),
        }
    }

    pub fn ninjas(&self) -> InMemoryNinjaRepository {
        InMemoryNinjaRepository {
            store: self.clone(),
        }
    }

    pub fn villages(&self) -> InMemoryVillageRepository {
        InMemoryVillageRepository {
            store: self.clone(),
        }
    }

    pub fn unit_of_work(&self) -> InMemoryUnitOfWork {
        InMemoryUnitOfWork {
            store: self.clone(),
        }
    }

    /// Wait until no other thread holds a unit of work
    fn admitted(&self) -> Result<MutexGuard<'_, Turn>, RepositoryError> {
        let me = thread::current().id();
        let mut turn = self.turn()?;
        while turn.owner.is_some_and(|owner| owner != me) {
            turn = self
                .gate
                .released
                .wait(turn)
                .map_err(|_| RepositoryError::transaction("Failed to acquire gate lock"))?;
        }
        Ok(turn)
    }

    fn turn(&self) -> Result<MutexGuard<'_, Turn>, RepositoryError> {
        self.gate
            .turn
            .lock()
            .map_err(|_| RepositoryError::transaction("Failed to acquire gate lock"))
    }

    // The gate is held until the data lock is taken, so a unit of work
    // cannot open in between.
    fn read(&self) -> Result<RwLockReadGuard<'_, StoreState>, RepositoryError> {
        let _turn = self.admitted()?;
        self.state
            .read()
            .map_err(|_| RepositoryError::persistence("Failed to acquire read lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, StoreState>, RepositoryError> {
        let _turn = self.admitted()?;
        self.state
            .write()
            .map_err(|_| RepositoryError::persistence("Failed to acquire write lock"))
    }

    /// Close the current thread's unit of work and wake the waiters
    fn release(&self, restore: bool) -> Result<(), RepositoryError> {
        let mut turn = self.turn()?;
        if turn.owner != Some(thread::current().id()) {
            return Err(RepositoryError::transaction("No unit of work in progress"));
        }

        let snapshot = turn.snapshot.take();
        let restored = match snapshot {
            Some(previous) if restore => self
                .state
                .write()
                .map(|mut state| *state = previous)
                .map_err(|_| RepositoryError::persistence("Failed to acquire write lock")),
            _ => Ok(()),
        };

        turn.owner = None;
        drop(turn);
        self.gate.released.notify_all();
        restored
    }
}

/// In-memory Mission Repository
#[derive(Debug, Clone)]
pub struct InMemoryMissionRepository {
    store: InMemoryStore,
}

impl MissionRepository for InMemoryMissionRepository {
    fn next_id(&mut self) -> Result<MissionId, RepositoryError> {
        let mut state = self.store.write()?;
        state.last_mission += 1;
        Ok(MissionId::new(state.last_mission))
    }

    fn save(&mut self, mission: &Mission) -> Result<(), RepositoryError> {
        let mut state = self.store.write()?;
        state.missions.insert(mission.id(), mission.clone());
        Ok(())
    }

    fn find_by_id(&self, id: MissionId) -> Result<Option<Mission>, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.missions.get(&id).cloned())
    }

    fn exists_by_title(&self, title: &str) -> Result<bool, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.missions.values().any(|m| m.title() == title))
    }

    fn find_all(&self) -> Result<Vec<Mission>, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.missions.values().cloned().collect())
    }

    fn delete(&mut self, id: MissionId) -> Result<(), RepositoryError> {
        let mut state = self.store.write()?;
        state.missions.remove(&id);
        Ok(())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.missions.len())
    }
}

/// In-memory Ninja Repository
#[derive(Debug, Clone)]
pub struct InMemoryNinjaRepository {
    store: InMemoryStore,
}

impl NinjaRepository for InMemoryNinjaRepository {
    fn next_id(&mut self) -> Result<NinjaId, RepositoryError> {
        let mut state = self.store.write()?;
        state.last_ninja += 1;
        Ok(NinjaId::new(state.last_ninja))
    }

    fn save(&mut self, ninja: &Ninja) -> Result<(), RepositoryError> {
        let mut state = self.store.write()?;
        state.ninjas.insert(ninja.id(), ninja.clone());
        Ok(())
    }

    fn save_all(&mut self, ninjas: &[Ninja]) -> Result<(), RepositoryError> {
        let mut state = self.store.write()?;
        for ninja in ninjas {
            state.ninjas.insert(ninja.id(), ninja.clone());
        }
        Ok(())
    }

    fn find_by_id(&self, id: NinjaId) -> Result<Option<Ninja>, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.ninjas.get(&id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Ninja>, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.ninjas.values().find(|n| n.email() == email).cloned())
    }

    fn find_all(&self) -> Result<Vec<Ninja>, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.ninjas.values().cloned().collect())
    }

    fn delete(&mut self, id: NinjaId) -> Result<(), RepositoryError> {
        let mut state = self.store.write()?;
        state.ninjas.remove(&id);
        Ok(())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.ninjas.len())
    }
}

/// In-memory Village Repository
#[derive(Debug, Clone)]
pub struct InMemoryVillageRepository {
    store: InMemoryStore,
}

impl VillageRepository for InMemoryVillageRepository {
    fn next_id(&mut self) -> Result<VillageId, RepositoryError> {
        let mut state = self.store.write()?;
        state.last_village += 1;
        Ok(VillageId::new(state.last_village))
    }

    fn save(&mut self, village: &Village) -> Result<(), RepositoryError> {
        let mut state = self.store.write()?;
        state.villages.insert(village.id(), village.clone());
        Ok(())
    }

    fn find_by_id(&self, id: VillageId) -> Result<Option<Village>, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.villages.get(&id).cloned())
    }

    fn find_all(&self) -> Result<Vec<Village>, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.villages.values().cloned().collect())
    }

    fn delete(&mut self, id: VillageId) -> Result<(), RepositoryError> {
        let mut state = self.store.write()?;
        state.villages.remove(&id);
        Ok(())
    }

    fn count(&self) -> Result<usize, RepositoryError> {
        let state = self.store.read()?;
        Ok(state.villages.len())
    }
}

/// Snapshot-based unit of work
///
/// `begin` copies the whole store; `rollback` puts the copy back. A unit of
/// work belongs to the thread that opened it. `begin` on another thread
/// waits for it to close; `begin` on the same thread is an error.
#[derive(Debug, Clone)]
pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn begin(&self) -> Result<(), RepositoryError> {
        let mut turn = self.store.admitted()?;
        if turn.owner.is_some() {
            return Err(RepositoryError::transaction(
                "A unit of work is already in progress",
            ));
        }

        let copy = self
            .store
            .state
            .read()
            .map_err(|_| RepositoryError::persistence("Failed to acquire read lock"))?
            .clone();
        turn.snapshot = Some(copy);
        turn.owner = Some(thread::current().id());
        Ok(())
    }

    fn commit(&self) -> Result<(), RepositoryError> {
        self.store.release(false)
    }

    fn rollback(&self) -> Result<(), RepositoryError> {
        self.store.release(true)
    }
}
