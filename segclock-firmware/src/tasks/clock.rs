//! Clock task
//!
//! Runs one engine pass per ticker period: resync if due, advance the
//! local second, re-encode and shift out the display image. Everything
//! happens inside this single task, so the frame is never shared.

use defmt::*;
use embassy_rp::uart::BufferedUart;
use embassy_time::{Delay, Duration, Ticker};

use segclock_core::time::{SyncOutcome, TimeSyncAdapter};
use segclock_core::traits::Chime;
use segclock_core::ClockEngine;
use segclock_drivers::chime::Buzzer;
use segclock_drivers::display::ShiftRegisterChain;
use segclock_drivers::sync::SerialSyncLink;
use segclock_hal::MillisClock;
use segclock_hal_rp2040::{EmbassyClock, GpioOutput};

pub type Display = ShiftRegisterChain<
    GpioOutput<'static>,
    GpioOutput<'static>,
    GpioOutput<'static>,
    Delay,
>;
pub type ClockBuzzer = Buzzer<GpioOutput<'static>, Delay>;
pub type SyncLink = SerialSyncLink<BufferedUart, EmbassyClock>;

/// Everything the clock task owns
pub struct ClockParts {
    pub engine: ClockEngine,
    pub sync: TimeSyncAdapter<SyncLink>,
    pub chime: ClockBuzzer,
    pub display: Display,
    pub refresh_ms: u32,
}

/// Remembers whether the pass sounded the chime
struct TrackedChime<'a, C> {
    inner: &'a mut C,
    fired: bool,
}

impl<C: Chime> Chime for TrackedChime<'_, C> {
    fn chime(&mut self) {
        self.fired = true;
        self.inner.chime();
    }
}

#[embassy_executor::task]
pub async fn clock_task(parts: ClockParts) {
    let ClockParts {
        mut engine,
        mut sync,
        mut chime,
        mut display,
        refresh_ms,
    } = parts;

    info!("Clock task started ({}ms passes)", refresh_ms);

    let clock = EmbassyClock;
    let mut ticker = Ticker::every(Duration::from_millis(refresh_ms as u64));

    loop {
        ticker.next().await;

        let mut tracked = TrackedChime {
            inner: &mut chime,
            fired: false,
        };
        let report = engine.step(clock.now_ms(), &mut sync, &mut tracked, &mut display);
        let chimed = tracked.fired;

        match report.sync {
            SyncOutcome::Applied(sample) => {
                let (h, m, s) = engine.clock().hms();
                info!(
                    "Time synced: {:02}:{:02}:{:02} standard, {:02}:{:02}:{:02} shown, DST {}",
                    sample.hour(),
                    sample.minute(),
                    sample.second(),
                    h,
                    m,
                    s,
                    sync.dst()
                );
            }
            SyncOutcome::Failed(e) => {
                warn!("Time sync failed: {:?}", e);
            }
            SyncOutcome::Skipped => {}
        }

        if chimed {
            info!("Hour chime at {:02}:00", engine.clock().hour());
        }

        if report.advanced {
            let (h, m, s) = engine.clock().hms();
            trace!("{:02}:{:02}:{:02}", h, m, s);
        }
    }
}
