use armsim_core::soc::traits::{InterruptController, IrqLine};
use mockall::mock;

mock! {
    pub Lines {}
    impl InterruptController for Lines {
        fn is_asserted(&self, line: IrqLine) -> bool;
        fn message(&self, line: IrqLine) -> String;
        fn wait_for_interrupt(&self);
    }
}
