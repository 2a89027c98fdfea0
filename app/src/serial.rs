/// An IRQ driven, transmit only serial log
///
pub mod uart1 {
    use crate::interrupt;
    use crate::hal::{
        pac,
        prelude::*,
        serial::{
            Event,
            Serial,
        }
    };
    use heapless::spsc::{Consumer, Producer, Queue};
    use stm32f0xx_hal::gpio::{
        gpiob,
        Alternate,
        AF0,
    };

    const TX_Q_SIZE: usize = 128;

    static mut TX_Q_CONSUMER: Option<Consumer<u8, TX_Q_SIZE>> = None;
    static mut TX_Q_PRODUCER: Option<Producer<u8, TX_Q_SIZE>> = None;

    type TxPinType = gpiob::PB6<Alternate<AF0>>;
    type RxPinType = gpiob::PB7<Alternate<AF0>>;
    static mut SERIAL: Option<Serial<pac::USART1, TxPinType, RxPinType>> = None;

    pub struct Uart1Tx {}

    impl core::fmt::Write for Uart1Tx {
        fn write_str(&mut self, s: &str) -> Result<(), core::fmt::Error> {
            for b in s.bytes() {
                write_byte(b);
            }
            Ok(())
        }
    }

    /// Must be called once during application initialization, before any writes
    pub fn init(serial: Serial<pac::USART1, TxPinType, RxPinType>, irq_prio: u8) {
        let core = unsafe { pac::CorePeripherals::steal() };
        let mut nvic = core.NVIC;

        static mut TX_Q: Queue<u8, TX_Q_SIZE> = Queue::new();

        let (tx_q_producer, tx_q_consumer) = unsafe { TX_Q.split() };

        unsafe {
            TX_Q_PRODUCER = Some(tx_q_producer);
            TX_Q_CONSUMER = Some(tx_q_consumer);
            SERIAL = Some(serial);

            nvic.set_priority(pac::Interrupt::USART1, irq_prio);
            pac::NVIC::unmask(pac::Interrupt::USART1);
        }
    }

    pub fn write_byte(b: u8) {
        let tx_q_producer = unsafe { TX_Q_PRODUCER.as_mut().unwrap_unchecked() };
        // Drop the byte if the queue is full
        let _ = tx_q_producer.enqueue(b);
        let serial = unsafe { SERIAL.as_mut().unwrap_unchecked() };
        serial.listen(Event::Txe);
    }

    pub fn writer() -> Uart1Tx {
        Uart1Tx {}
    }

    #[interrupt]
    fn USART1() {
        let serial = unsafe { SERIAL.as_mut().unwrap_unchecked() };
        let tx_q_consumer = unsafe { TX_Q_CONSUMER.as_mut().unwrap_unchecked() };

        match tx_q_consumer.dequeue() {
            Some(b) => {
                // TXE is the only interrupt enabled, so there is room for a byte
                serial.write(b).ok();
            },
            None => {
                // Nothing left to send. TXE is re-enabled when data is written to the queue
                serial.unlisten(Event::Txe);
            }
        }
    }
}

/// Write a formatted line to the serial log
macro_rules! log {
    ($($arg:tt)*) => {
        {
            use core::fmt::Write;
            let mut writer = $crate::serial::uart1::writer();
            write!(writer, $($arg)*).ok();
            writer.write_str("\r\n").ok();
        }
    };
}
