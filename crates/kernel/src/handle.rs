use crate::params::{ParamEdit, WaveParameters};
use seascape_common::ParamError;
use std::sync::{Arc, PoisonError, RwLock};

/// A complete, consistent copy of the parameters at some revision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot {
    pub params: WaveParameters,
    /// Incremented on every successful publish. Starts at 0.
    pub revision: u64,
}

/// The single write handle to the live wave parameters.
///
/// The panel edits through this handle; the frame loop and any worker
/// threads read through [`ParamReader`]s. Writers publish whole snapshots,
/// so a reader never observes half of an edit. The handle is not `Clone`:
/// there is exactly one writer per session.
#[derive(Debug)]
pub struct ParamHandle {
    local: WaveParameters,
    revision: u64,
    shared: Arc<RwLock<Snapshot>>,
}

/// Cheap, cloneable read side of a [`ParamHandle`].
#[derive(Debug, Clone)]
pub struct ParamReader {
    shared: Arc<RwLock<Snapshot>>,
}

impl ParamHandle {
    /// Create the handle and publish `params` as revision 0.
    pub fn new(params: WaveParameters) -> Result<Self, ParamError> {
        params.validate()?;
        let snapshot = Snapshot {
            params,
            revision: 0,
        };
        Ok(Self {
            local: params,
            revision: 0,
            shared: Arc::new(RwLock::new(snapshot)),
        })
    }

    pub fn reader(&self) -> ParamReader {
        ParamReader {
            shared: Arc::clone(&self.shared),
        }
    }

    /// The writer's view of the parameters. Always equal to the last published snapshot.
    pub fn params(&self) -> &WaveParameters {
        &self.local
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Validate and publish a single panel edit.
    pub fn apply(&mut self, edit: &ParamEdit) -> Result<u64, ParamError> {
        let mut next = self.local;
        next.apply(edit)?;
        tracing::debug!(?edit, "parameter edit applied");
        Ok(self.publish(next))
    }

    /// Validate and publish a whole parameter set (e.g. a loaded preset).
    pub fn replace(&mut self, params: WaveParameters) -> Result<u64, ParamError> {
        params.validate()?;
        Ok(self.publish(params))
    }

    /// Restore and publish the defaults.
    pub fn reset(&mut self) -> u64 {
        tracing::debug!("parameters reset to defaults");
        self.publish(WaveParameters::default())
    }

    fn publish(&mut self, params: WaveParameters) -> u64 {
        self.local = params;
        self.revision += 1;
        let mut shared = self.shared.write().unwrap_or_else(PoisonError::into_inner);
        *shared = Snapshot {
            params,
            revision: self.revision,
        };
        self.revision
    }
}

impl ParamReader {
    /// Copy out the latest published parameters.
    pub fn snapshot(&self) -> Snapshot {
        *self.shared.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Axis, ScalarParam};
    use glam::Vec2;

    #[test]
    fn readers_see_latest_edit() {
        let mut handle = ParamHandle::new(WaveParameters::default()).unwrap();
        let reader = handle.reader();
        assert_eq!(reader.snapshot().revision, 0);

        let rev = handle
            .apply(&ParamEdit::Scalar(ScalarParam::BigWaveSpeed, 0.1))
            .unwrap();
        let snap = reader.snapshot();
        assert_eq!(rev, 1);
        assert_eq!(snap.revision, 1);
        assert_eq!(snap.params.big_wave_speed, 0.1);
        assert_eq!(&snap.params, handle.params());
    }

    #[test]
    fn rejected_edit_is_not_published() {
        let mut handle = ParamHandle::new(WaveParameters::default()).unwrap();
        let reader = handle.reader();
        assert!(
            handle
                .apply(&ParamEdit::Frequency(Axis::X, f32::NAN))
                .is_err()
        );
        assert_eq!(handle.revision(), 0);
        assert_eq!(reader.snapshot().params, WaveParameters::default());
    }

    #[test]
    fn invalid_initial_parameters_are_refused() {
        let params = WaveParameters {
            color_offset: f32::INFINITY,
            ..WaveParameters::default()
        };
        assert!(ParamHandle::new(params).is_err());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut handle = ParamHandle::new(WaveParameters::default()).unwrap();
        handle
            .apply(&ParamEdit::Scalar(ScalarParam::ColorOffset, 0.9))
            .unwrap();
        let rev = handle.reset();
        assert_eq!(rev, 2);
        assert_eq!(handle.reader().snapshot().params, WaveParameters::default());
    }

    #[test]
    fn concurrent_readers_never_see_torn_snapshots() {
        let mut handle = ParamHandle::new(WaveParameters::default()).unwrap();
        let reader = handle.reader();

        let worker = std::thread::spawn(move || {
            let mut last = 0;
            for _ in 0..20_000 {
                let snap = reader.snapshot();
                // The writer only ever publishes x == y == speed * 10.
                let f = snap.params.big_wave_frequency;
                if snap.revision > 0 {
                    assert_eq!(f.x, f.y);
                    assert_eq!(f.x, snap.params.big_wave_speed * 10.0);
                }
                assert!(snap.revision >= last);
                last = snap.revision;
            }
        });

        for i in 0..2_000 {
            let v = (i % 10) as f32 * 0.1;
            let params = WaveParameters {
                big_wave_frequency: Vec2::splat(v * 10.0),
                big_wave_speed: v,
                ..WaveParameters::default()
            };
            handle.replace(params).unwrap();
        }
        worker.join().unwrap();
    }
}
