pub mod configuration;

pub mod engine;

pub mod function {
    pub mod evaluablefunction;
    pub mod catalogfunction;
}

pub mod math {
    pub mod round;
}

pub mod quadrature {
    pub mod quadratureerror;
    pub mod stepvalidator;
    pub mod samplegrid;
    pub mod quadraturerule;
    pub mod spanchecker;
    pub mod stepsearch;
    pub mod rungeestimator;
}

pub mod request {
    pub mod requesterror;
    pub mod integrationrequest;
}
