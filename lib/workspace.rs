//! Pre-sized scratch buffers for the tunneling solver.
//!
//! A [`Workspace`] holds every array a single run touches, so that the
//! stepping loops in [`timedep`][crate::timedep] never allocate. A workspace is
//! owned by exactly one run at a time: either pass it by `&mut` or check one
//! out of a [`WorkspacePool`], which hands each caller its own buffers and
//! takes them back when the [`PooledWorkspace`] guard is dropped.

use std::{
    ops::{ Deref, DerefMut },
    sync::{ Mutex, OnceLock },
};
use ndarray as nd;
use crate::DEFAULT_GRID_POINTS;

/// Scratch buffers for one tunneling run at a fixed resolution.
#[derive(Clone, Debug)]
pub struct Workspace {
    /// Grid coordinates
    pub x: nd::Array1<f64>,
    /// Potential
    pub V: nd::Array1<f64>,
    /// Real part of the wavefunction
    pub re: nd::Array1<f64>,
    /// Imaginary part of the wavefunction
    pub im: nd::Array1<f64>,
    /// Temporary for the real part
    pub tmp_re: nd::Array1<f64>,
    /// Temporary for the imaginary part
    pub tmp_im: nd::Array1<f64>,
}

impl Workspace {
    /// Allocate zeroed buffers for `n` grid points.
    pub fn new(n: usize) -> Self {
        Self {
            x: nd::Array1::zeros(n),
            V: nd::Array1::zeros(n),
            re: nd::Array1::zeros(n),
            im: nd::Array1::zeros(n),
            tmp_re: nd::Array1::zeros(n),
            tmp_im: nd::Array1::zeros(n),
        }
    }

    /// Number of grid points the buffers hold.
    pub fn capacity(&self) -> usize { self.x.len() }
}

/// A thread-safe collection of idle workspaces of one resolution.
///
/// Checkouts pop an idle workspace (or allocate a new one if none is idle), so
/// concurrent callers never share buffers.
#[derive(Debug)]
pub struct WorkspacePool {
    n: usize,
    idle: Mutex<Vec<Workspace>>,
}

impl WorkspacePool {
    /// Create an empty pool serving workspaces of `n` grid points.
    pub fn new(n: usize) -> Self {
        Self { n, idle: Mutex::new(Vec::new()) }
    }

    /// Resolution served by this pool.
    pub fn capacity(&self) -> usize { self.n }

    /// Number of workspaces currently waiting to be reused.
    pub fn idle(&self) -> usize { self.lock().len() }

    /// Take exclusive ownership of a workspace until the guard is dropped.
    pub fn checkout(&self) -> PooledWorkspace<'_> {
        let ws
            = self.lock().pop()
            .unwrap_or_else(|| {
                log::debug!("workspace pool: allocating {} points", self.n);
                Workspace::new(self.n)
            });
        PooledWorkspace { pool: self, ws }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Workspace>> {
        // the buffers carry no invariants a panicking holder could break
        self.idle.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn restore(&self, ws: Workspace) {
        self.lock().push(ws);
    }
}

/// Exclusive handle on a pooled [`Workspace`], returned to its pool on drop.
#[derive(Debug)]
pub struct PooledWorkspace<'a> {
    pool: &'a WorkspacePool,
    ws: Workspace,
}

impl Deref for PooledWorkspace<'_> {
    type Target = Workspace;

    fn deref(&self) -> &Workspace { &self.ws }
}

impl DerefMut for PooledWorkspace<'_> {
    fn deref_mut(&mut self) -> &mut Workspace { &mut self.ws }
}

impl Drop for PooledWorkspace<'_> {
    fn drop(&mut self) {
        // zero-length arrays don't allocate
        let ws = std::mem::replace(&mut self.ws, Workspace::new(0));
        self.pool.restore(ws);
    }
}

static DEFAULT_POOL: OnceLock<WorkspacePool> = OnceLock::new();

/// Process-wide pool at [`DEFAULT_GRID_POINTS`].
pub fn default_pool() -> &'static WorkspacePool {
    DEFAULT_POOL.get_or_init(|| WorkspacePool::new(DEFAULT_GRID_POINTS))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkout_returns_on_drop() {
        let pool = WorkspacePool::new(16);
        assert_eq!(pool.idle(), 0);
        {
            let mut a = pool.checkout();
            let b = pool.checkout();
            assert_eq!(a.capacity(), 16);
            assert_eq!(b.capacity(), 16);
            a.re[3] = 1.0;
            assert_eq!(b.re[3], 0.0);
        }
        assert_eq!(pool.idle(), 2);
        let c = pool.checkout();
        assert_eq!(c.capacity(), 16);
        assert_eq!(pool.idle(), 1);
    }

    #[test]
    fn concurrent_checkouts_are_disjoint() {
        let pool = WorkspacePool::new(8);
        std::thread::scope(|s| {
            for t in 0..4 {
                let pool = &pool;
                s.spawn(move || {
                    for _ in 0..50 {
                        let mut ws = pool.checkout();
                        ws.re.fill(t as f64);
                        std::thread::yield_now();
                        assert!(ws.re.iter().all(|r| *r == t as f64));
                    }
                });
            }
        });
        assert!(pool.idle() >= 1 && pool.idle() <= 4);
    }
}
