use armsim_core::common::CoreResult;
use armsim_core::core::arch::coproc::{Coprocessor, CoprocessorRegId};
use mockall::mock;

mock! {
    pub Slot {}
    impl Coprocessor for Slot {
        fn name(&self) -> &'static str;
        fn is_valid_id(&self, id: CoprocessorRegId) -> bool;
        fn get_register(&self, id: CoprocessorRegId) -> u32;
        fn set_register(&mut self, id: CoprocessorRegId, value: u32);
        fn data_operation(&mut self, word: u32) -> CoreResult<()>;
    }
}
