//!
//! The counter robot keeps a count of its periodic updates and puts the
//! count in the `SmartDashboard` table.
//!

use tracing::{info, warn};

use elastic_core::Node;
use elastic_tables::{NetworkTable, NetworkTableInstance};
use elasticlib::{Elastic, Notification, NotificationLevel};

/// The default period of the robot loop (in us)
pub const DEFAULT_PERIOD_US: u128 = 20_000;

/// A robot whose only periodic work is publishing a counter
pub struct CounterRobot {
    counter: u64,
    period_us: u128,
    dashboard: NetworkTable,
    elastic: Elastic,
}

impl CounterRobot {
    /// Create a counter robot on the given instance updating every `period_us`
    pub fn new(instance: &NetworkTableInstance, elastic: Elastic, period_us: u128) -> Self {
        Self {
            counter: 0,
            period_us,
            dashboard: instance.get_table("SmartDashboard"),
            elastic,
        }
    }

    /// The number of periodic updates so far
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

impl Node for CounterRobot {
    fn get_update_delay_us(&self) -> u128 {
        self.period_us
    }

    fn start(&mut self) {
        self.elastic.send_notification(
            &Notification::new(
                NotificationLevel::Info,
                "Robot started",
                format!("Publishing Counter every {} ms", self.period_us / 1_000),
            )
            .with_display_seconds(2.0),
        );
    }

    fn update(&mut self) {
        self.counter += 1;
        if let Err(err) = self.dashboard.put_number("Counter", self.counter as f64) {
            warn!(error = %err, "could not publish counter");
        }
    }

    fn shutdown(&mut self) {
        info!(counter = self.counter, "counter robot shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossbeam::channel::unbounded;

    use elastic_core::{Executor, Subscriber};
    use elastic_executors::SimpleExecutor;
    use elasticlib::NOTIFICATION_TOPIC;

    #[test]
    fn test_update_publishes_counter() {
        let instance = NetworkTableInstance::new();
        let mut robot = CounterRobot::new(&instance, Elastic::new(&instance), DEFAULT_PERIOD_US);

        robot.update();
        robot.update();

        assert_eq!(robot.counter(), 2);
        assert_eq!(
            instance.get_table("SmartDashboard").get_number("Counter"),
            Some(2.0)
        );
    }

    #[test]
    fn test_start_sends_notification() {
        let instance = NetworkTableInstance::new();
        let mut notifications = instance.get_string_topic(NOTIFICATION_TOPIC).subscribe();
        let mut robot = CounterRobot::new(&instance, Elastic::new(&instance), DEFAULT_PERIOD_US);

        robot.start();

        let sent = notifications.get().clone().expect("no notification was sent");
        let sent: Notification = serde_json::from_str(&sent).unwrap();
        assert_eq!(sent.level(), &NotificationLevel::Info);
        assert_eq!(sent.title(), "Robot started");
        assert_eq!(sent.description(), "Publishing Counter every 20 ms");
        assert_eq!(sent.display_time_millis(), 2000);
    }

    #[test]
    fn test_runs_on_simple_executor() {
        let instance = NetworkTableInstance::new();
        let robot = CounterRobot::new(&instance, Elastic::new(&instance), 10_000);
        let mut counter = instance.get_double_topic("/SmartDashboard/Counter").subscribe();

        let (_tx, rx) = unbounded();
        let mut executor = SimpleExecutor::new_with(rx, vec![Box::new(robot)]);
        executor.update_for_ms(55);

        let count = (*counter.get()).expect("counter was never published");
        assert!((3.0..=7.0).contains(&count), "counter reached {count}");
    }
}
