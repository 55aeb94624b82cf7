use std::fmt::Debug;

#[cfg(test)]
use crate::pal::FakeTimeSource;
use crate::pal::{RealTimeSource, TimeSource};

#[derive(Clone, Debug)]
pub(crate) enum TimeSourceFacade {
    Real(RealTimeSource),

    #[cfg(test)]
    Fake(FakeTimeSource),
}

impl TimeSourceFacade {
    pub(crate) const fn real() -> Self {
        Self::Real(RealTimeSource::new())
    }
}

impl TimeSource for TimeSourceFacade {
    fn nanos(&self) -> u64 {
        match self {
            Self::Real(source) => source.nanos(),
            #[cfg(test)]
            Self::Fake(source) => source.nanos(),
        }
    }
}

#[cfg(test)]
impl From<FakeTimeSource> for TimeSourceFacade {
    fn from(source: FakeTimeSource) -> Self {
        Self::Fake(source)
    }
}
