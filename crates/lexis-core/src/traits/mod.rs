mod storage;

pub use storage::{
    ICorrectionStorage, ILearningEventStorage, ILearningLedger, ILearningStore,
    ITypeDefinitionStorage,
};
