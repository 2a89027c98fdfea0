pub mod common;

use common::{MockEngine, Recorded, Recorder};
use touch_events::edge::ActivityBitfield;
use touch_events::{
    ActionQueue, ButtonAction, ButtonPipeline, ScanFlag, ScanReport, SliderAction, SliderPipeline, TouchEvent,
    TouchProcessor,
};

// Buttons on widgets 0 and 1, slider on widget 2, like the reference board
fn processor() -> TouchProcessor<'static, 2, 1> {
    TouchProcessor::new(ButtonPipeline::new([0, 1], None), SliderPipeline::new([2], None))
}

#[test]
fn test_poll_waits_for_scan() {
    static SCAN_COMPLETE: ScanFlag = ScanFlag::new();
    let mut touch = processor();
    let mut sink = Recorder::default();
    let engine = MockEngine::touching(&[0]).at(2, 400);

    assert_eq!(touch.poll(&SCAN_COMPLETE, &engine, &mut sink), None);
    assert!(sink.actions.is_empty());

    SCAN_COMPLETE.signal();
    assert_eq!(
        touch.poll(&SCAN_COMPLETE, &engine, &mut sink),
        Some(ScanReport {
            buttons: ActivityBitfield(0b01),
            active_slider: Some(0),
        })
    );
    // Sliders run before buttons
    assert_eq!(
        sink.actions.iter().map(|(_, r)| *r).collect::<Vec<_>>(),
        [
            Recorded::Slider(0, SliderAction::Touchdown, 400),
            Recorded::Button(0, ButtonAction::Touchdown),
        ]
    );

    // Flag was consumed
    assert_eq!(touch.poll(&SCAN_COMPLETE, &engine, &mut sink), None);
}

#[test]
fn test_button_and_slider_are_independent() {
    let mut touch = processor();
    let mut sink = Recorder::default();

    // Slider touched alone, then button 1 joins and leaves while the slider is held
    touch.process(&MockEngine::idle().at(2, 100), &mut sink);
    touch.process(&MockEngine::touching(&[1]).at(2, 110), &mut sink);
    touch.process(&MockEngine::idle().at(2, 110), &mut sink);
    touch.process(&MockEngine::idle(), &mut sink);

    assert_eq!(
        sink.actions.iter().map(|(_, r)| *r).collect::<Vec<_>>(),
        [
            Recorded::Slider(0, SliderAction::Touchdown, 100),
            Recorded::Slider(0, SliderAction::Moved(10), 110),
            Recorded::Button(1, ButtonAction::Touchdown),
            Recorded::Button(1, ButtonAction::LiftOff),
            Recorded::Slider(0, SliderAction::LiftOff, 110),
        ]
    );
}

#[test]
fn test_queue_sink() {
    let mut touch = processor();
    let mut queue: ActionQueue<8> = ActionQueue::new();

    touch.process(&MockEngine::touching(&[1]), &mut queue);
    touch.process(&MockEngine::idle(), &mut queue);

    assert_eq!(
        queue.dequeue(),
        Some(TouchEvent::Button {
            button: 1,
            action: ButtonAction::Touchdown
        })
    );
    assert_eq!(
        queue.dequeue(),
        Some(TouchEvent::Button {
            button: 1,
            action: ButtonAction::LiftOff
        })
    );
    assert_eq!(queue.dequeue(), None);
    assert_eq!(queue.dropped(), 0);
}
