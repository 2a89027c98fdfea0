#![no_main]
#![no_std]

use core::sync::atomic::{AtomicU32, Ordering};
use core::cell::RefCell;
use cortex_m;
use cortex_m::interrupt::Mutex;
use cortex_m_rt::{entry, exception};
use embedded_hal::digital::v2::OutputPin;
use panic_halt as _;

use stm32f0xx_hal as hal;

use touch_events::{
    ActionTable, ButtonAction, ButtonPipeline, ChangePolicy, ScanFlag, SliderAction, SliderConfig, SliderPipeline,
    TimingConfig, TouchProcessor,
};

use crate::hal::gpio::{gpioc, Output, PushPull};
use crate::hal::pac;
use crate::hal::pac::interrupt;
use crate::hal::prelude::*;

use sensing::{BoardSensing, BUTTON0_WIDGET, BUTTON1_WIDGET, SLIDER0_WIDGET};
use tsc::{TouchController, TscChannel};

#[macro_use]
mod serial;
mod sensing;
mod tsc;

/// Scan order must match the channel order expected by `BoardSensing`
static SCAN_CHANNELS: [TscChannel; sensing::NUM_CHANNELS] = [
    TscChannel { group: 1, sample: 2, channel: 1}, // Button 0
    TscChannel { group: 6, sample: 2, channel: 1}, // Button 1
    TscChannel { group: 2, sample: 3, channel: 1}, // Slider left
    TscChannel { group: 3, sample: 4, channel: 2}, // Slider middle
    TscChannel { group: 5, sample: 2, channel: 1}, // Slider right
];

/// SysTick period, and also the scan period
const SCAN_PERIOD_MS: u32 = 10;

static TIMING_CONFIG: TimingConfig = TimingConfig::from_millis(SCAN_PERIOD_MS, 800, 200, 5000, 5000);

static SLIDER_CONFIG: SliderConfig = SliderConfig {
    change_policy: ChangePolicy::Threshold(25),
};

/// Counts of delta required for a touch
const DETECT_THRESHOLD: u16 = 100;

struct Led {
    pin: gpioc::PC8<Output<PushPull>>,
    on: bool,
}

impl Led {
    fn set(&mut self, on: bool) {
        self.on = on;
        if on {
            self.pin.set_high().ok();
        } else {
            self.pin.set_low().ok();
        }
    }

    fn toggle(&mut self) {
        self.set(!self.on);
    }
}

static LED: Mutex<RefCell<Option<Led>>> = Mutex::new(RefCell::new(None));
static TIME: AtomicU32 = AtomicU32::new(0);
static SCAN_COMPLETE: ScanFlag = ScanFlag::new();

fn with_led(f: impl FnOnce(&mut Led)) {
    cortex_m::interrupt::free(|cs| {
        if let Some(led) = LED.borrow(cs).borrow_mut().as_mut() {
            f(led);
        }
    });
}

fn on_button0(action: ButtonAction) {
    log!("button 0: {:?}", action);
    if action == ButtonAction::Touchdown {
        with_led(Led::toggle);
    }
}

fn on_button1(action: ButtonAction) {
    log!("button 1: {:?}", action);
    match action {
        ButtonAction::Touchdown => with_led(|led| led.set(true)),
        ButtonAction::LiftOff => with_led(|led| led.set(false)),
        _ => (),
    }
}

fn on_slider0(action: SliderAction, position: u16) {
    log!("slider 0: {:?} at {}", action, position);
    if let SliderAction::Moved(_) = action {
        with_led(Led::toggle);
    }
}

#[entry]
fn main() -> ! {
    let dp = pac::Peripherals::take().unwrap();
    let cp = cortex_m::Peripherals::take().unwrap();
    let mut nvic = cp.NVIC;

    let mut flash = dp.FLASH;
    let mut rcc = dp.RCC.configure().sysclk(48.mhz()).freeze(&mut flash);
    let gpioa = dp.GPIOA.split(&mut rcc);
    let gpiob = dp.GPIOB.split(&mut rcc);
    let gpioc = dp.GPIOC.split(&mut rcc);

    // A library requiring a critical section to set a gpio AF register is bad and I just won't.
    let fake_cs = unsafe { cortex_m::interrupt::CriticalSection::new() };

    // Initialize touch pins
    let _btn0 = gpioa.pa0.into_alternate_af3(&fake_cs);
    let _btn1 = gpiob.pb11.into_alternate_af3(&fake_cs);
    let _slider_l = gpioa.pa4.into_alternate_af3(&fake_cs);
    let _slider_m = gpiob.pb0.into_alternate_af3(&fake_cs);
    let _slider_r = gpiob.pb3.into_alternate_af3(&fake_cs);
    let _g1_cap = gpioa.pa1.into_alternate_af3(&fake_cs);
    let _g2_cap = gpioa.pa6.into_alternate_af3(&fake_cs);
    let _g3_cap = gpiob.pb2.into_alternate_af3(&fake_cs);
    let _g5_cap = gpiob.pb4.into_alternate_af3(&fake_cs);
    let _g6_cap = gpiob.pb12.into_alternate_af3(&fake_cs);

    let led = Led {
        pin: gpioc.pc8.into_push_pull_output(&fake_cs),
        on: false,
    };
    cortex_m::interrupt::free(|cs| {
        LED.borrow(cs).borrow_mut().replace(led);
    });

    let tx_pin = gpiob.pb6.into_alternate_af0(&fake_cs);
    let rx_pin = gpiob.pb7.into_alternate_af0(&fake_cs);
    let uart = hal::serial::Serial::usart1(dp.USART1, (tx_pin, rx_pin), 115200.bps(), &mut rcc);
    serial::uart1::init(uart, 4);

    let mut touch = TouchController::new(dp.TSC, &mut rcc);

    unsafe {
        nvic.set_priority(pac::Interrupt::TSC, 3);
        cortex_m::peripheral::NVIC::unmask(pac::Interrupt::TSC);
    }

    let mut syst = hal::timers::Timer::syst(cp.SYST, (1000 / SCAN_PERIOD_MS).hz(), &mut rcc);
    syst.listen(&hal::timers::Event::TimeOut);

    let mut sensing = BoardSensing::new(DETECT_THRESHOLD);
    let mut processor = TouchProcessor::new(
        ButtonPipeline::new([BUTTON0_WIDGET, BUTTON1_WIDGET], Some(&TIMING_CONFIG)),
        SliderPipeline::new([SLIDER0_WIDGET], Some(&SLIDER_CONFIG)),
    );
    let mut actions: ActionTable<2, 1> = ActionTable::new()
        .button(0, on_button0)
        .button(1, on_button1)
        .slider(0, on_slider0);

    log!("touch panel up, {:?}", TIMING_CONFIG);

    let mut scanning = false;
    let mut next_time = 0;

    loop {
        if SCAN_COMPLETE.is_set() {
            sensing.update(touch.read(&SCAN_CHANNELS));
            processor.poll(&SCAN_COMPLETE, &sensing, &mut actions);
            scanning = false;
        }

        // Start scans at a fixed rate, so hold timings in scan cycles stay true
        let time = TIME.load(Ordering::Relaxed);
        if !scanning && time >= next_time {
            next_time = time + 1;
            touch.start(&SCAN_CHANNELS);
            scanning = true;
        }
    }
}

#[exception]
fn SysTick() {
    let time = TIME.load(Ordering::Relaxed);
    TIME.store(time + 1, Ordering::Relaxed);
}

#[interrupt]
fn TSC() {
    tsc::clear_flags();
    SCAN_COMPLETE.signal();
}
