//! ticktock - STM32F103 firmware
//!
//! A single foreground loop paced by a 1 ms SysTick clock runs three
//! tasks once per second:
//!
//! - Print: sends "Hello World!" over USART1 (PA9) after a PA0 press
//! - LEDs: PB13/PB14 follow the switches on PA8/PA15
//! - Clock: HH:MM on a TM1637-style display (CLK PB10, DIO PB11)
//!
//! SysTick and EXTI0 are the only interrupts. SysTick advances the tick
//! counter, EXTI0 raises the button flag; neither touches a peripheral
//! owned by a task.

#![no_std]
#![no_main]

use cortex_m_rt::{entry, exception};
use defmt::*;
use embassy_stm32::gpio::{self, Level, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::Priority;
use embassy_stm32::usart::{Config as UartConfig, UartTx};
use {defmt_rtt as _, panic_probe as _};

use ticktock_core::interrupt::HandlerChain;
use ticktock_core::scheduler::{Scheduler, Task};
use ticktock_core::time::{TickClock, TickCounter};
use ticktock_drivers::display::SegmentDisplay;
use ticktock_drivers::serial::{BaudDivisor, SerialLink};
use ticktock_hal_stm32f1::{exti, gpio as board_gpio, rcc, Input, Output, SysTickTimer, Usart1};

use crate::config::BOARD;
use crate::tasks::{ClockDisplayTask, LedsTask, PrintTask};

mod config;
mod tasks;

/// Advanced only by the SysTick handler
static TICKS: TickCounter = TickCounter::new();

/// Handlers dispatched from EXTI0, in order
static EXTI0_HANDLERS: HandlerChain<1> = HandlerChain::new([tasks::print::on_button]);

/// Below SysTick so the tick is never delayed by the button
const EXTI0_PRIORITY: Priority = Priority::P1;

// board.toml has to describe the USART1 clock that rcc actually programs
const _: () = assert!(
    BOARD.serial.peripheral_clock_hz == rcc::APB2_HZ,
    "board.toml serial.peripheral_clock_hz does not match the APB2 clock"
);

#[entry]
fn main() -> ! {
    info!("ticktock firmware starting...");

    // Spins until HSE and PLL are ready
    let p = embassy_stm32::init(rcc::clock_config());
    let mut core = unwrap!(cortex_m::Peripherals::take());
    info!("Clocks configured: {} Hz", rcc::SYSCLK_HZ);

    let mut systick = SysTickTimer::new(core.SYST, &mut core.SCB, rcc::SYSCLK_HZ);
    let clock = TickClock::start(&TICKS, &mut systick);
    info!("Tick clock running");

    // USART1: PA9 TX, 8N1. embassy sets up the frame, BRR is overwritten
    // with the divisor for the board.toml baud rate at the APB2 clock.
    let divisor = unwrap!(BaudDivisor::compute(BOARD.serial.baud_rate, rcc::APB2_HZ));
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BOARD.serial.baud_rate;
    let tx = unwrap!(UartTx::new_blocking(p.USART1, p.PA9, uart_config));
    let link = SerialLink::new(Usart1::new(tx), clock, divisor);
    info!(
        "USART1 at {} baud (mantissa {}, fraction {})",
        BOARD.serial.baud_rate,
        divisor.mantissa(),
        divisor.fraction()
    );

    let _button = gpio::Input::new(p.PA0, Pull::None);
    exti::enable_pa0_rising(EXTI0_PRIORITY);
    let mut print = PrintTask::new(link, &tasks::print::BUTTON, BOARD.serial.print_timeout_ms);

    // PA15 is JTDI after reset
    board_gpio::release_jtag_pins();
    let mut leds = LedsTask::new(
        Output::new(gpio::Output::new(p.PB13, Level::Low, Speed::Low)),
        Output::new(gpio::Output::new(p.PB14, Level::Low, Speed::Low)),
        Input::new(gpio::Input::new(p.PA8, Pull::None)),
        Input::new(gpio::Input::new(p.PA15, Pull::None)),
    );

    let mut display = SegmentDisplay::new(
        Output::new(gpio::Output::new(p.PB10, Level::Low, Speed::Low)),
        Output::new(gpio::Output::new(p.PB11, Level::Low, Speed::Low)),
        clock,
    );
    if display.brightness() != BOARD.display.brightness {
        display.set_brightness(BOARD.display.brightness);
    }
    let mut clock_display = ClockDisplayTask::new(display);
    info!("Tasks ready");

    let tasks: [&mut dyn Task; 3] = [&mut print, &mut leds, &mut clock_display];
    let mut scheduler = Scheduler::new(clock, BOARD.loop_period_ms, tasks);
    info!("Scheduler running ({} ms period)", scheduler.period());
    scheduler.run()
}

#[exception]
fn SysTick() {
    TICKS.on_tick();
}

#[interrupt]
fn EXTI0() {
    exti::clear_pending();
    EXTI0_HANDLERS.dispatch();
}
