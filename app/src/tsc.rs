//! Interrupt driven acquisition on the STM32 Touch Sensing Controller.
//!
//! The HAL driver only supports blocking, single pin acquisitions, so channel setup
//! and interrupt handling are done on the registers directly. The HAL is still used
//! to enable the peripheral clock and program the control register.
//!
//! Completion (end of acquisition, or max count error) raises the TSC interrupt,
//! whose handler must call [`clear_flags`].

use crate::hal;
use crate::hal::pac;
use crate::hal::rcc::Rcc;
use crate::hal::tsc::Tsc;

/// One electrode: the group it belongs to, the group's sampling cap channel, and the
/// electrode's channel. All numbers start at 1.
#[derive(Clone, Copy, Debug)]
pub struct TscChannel {
    pub group: u8,
    pub sample: u8,
    pub channel: u8,
}

pub struct TouchController {
    tsc: Tsc,
    max_count: u16,
}

impl TouchController {
    pub fn new(tsc: pac::TSC, rcc: &mut Rcc) -> Self {
        let config = hal::tsc::Config {
            clock_prescale: None,
            max_count: Some(hal::tsc::MaxCount::U8191),
            charge_transfer_high: None,
            charge_transfer_low: None,
        };
        Self {
            tsc: Tsc::tsc(tsc, rcc, Some(config)),
            max_count: 8191,
        }
    }

    /// Setup the channels and begin an acquisition, without waiting for it
    ///
    /// Every channel must be in a different group.
    pub fn start<const N: usize>(&mut self, channels: &[TscChannel; N]) {
        let regs = unsafe { pac::Peripherals::steal().TSC };

        let mut iogcsr: u32 = 0;
        let mut ioscr: u32 = 0;
        let mut ioccr: u32 = 0;

        for c in channels {
            iogcsr |= 1 << (c.group - 1);
            ioscr |= 1 << ((c.group - 1) * 4 + c.sample - 1);
            ioccr |= 1 << ((c.group - 1) * 4 + c.channel - 1);
        }

        regs.iogcsr.write(|w| unsafe { w.bits(iogcsr) });
        regs.ioscr.write(|w| unsafe { w.bits(ioscr) });
        regs.ioccr.write(|w| unsafe { w.bits(ioccr) });

        clear_flags();
        regs.ier.write(|w| w.eoaie().set_bit().mceie().set_bit());
        regs.cr.modify(|_, w| w.iodef().clear_bit());
        regs.cr.modify(|_, w| w.start().set_bit());
    }

    /// Read the counts of the last acquisition
    ///
    /// A group which hit the max count before its sampling cap charged reads as
    /// `max_count + 1`, which is never mistaken for a touch.
    pub fn read<const N: usize>(&self, channels: &[TscChannel; N]) -> [u16; N] {
        let regs = unsafe { pac::Peripherals::steal().TSC };

        // Status bits indicate if the group completed successfully.
        let group_status = regs.iogcsr.read().bits() >> 16;

        let mut result = [self.max_count + 1; N];
        for (i, c) in channels.iter().enumerate() {
            if group_status & (1 << (c.group - 1)) != 0 {
                result[i] = self.tsc.read_unchecked(c.group);
            }
        }

        result
    }
}

/// Clear end-of-acquisition and max-count-error flags
pub fn clear_flags() {
    let regs = unsafe { pac::Peripherals::steal().TSC };
    regs.icr.write(|w| {
        w.eoaic().set_bit() // end-of-acquisition
        .mceic().set_bit() // max-count-error
    });
}
