use application::transfer::GetAreaDto;

use crate::controller::Intake;

#[derive(Debug)]
pub struct GetAreaRequest {
    id: String,
}

impl GetAreaRequest {
    pub fn new(id: String) -> Self {
        Self { id }
    }
}

pub struct AreaTransformer;

impl Intake<GetAreaRequest> for AreaTransformer {
    type To = GetAreaDto;
    fn emit(&self, input: GetAreaRequest) -> Self::To {
        GetAreaDto { id: input.id }
    }
}
