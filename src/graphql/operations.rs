//! Named GraphQL documents. Operation names and response shapes are the
//! wire-level contract with the backend; every response root carries the
//! `{ success, message, data }` envelope.

pub struct OperationDoc {
    /// Operation name, used for logging.
    pub name: &'static str,
    /// Root field under `data` holding the envelope.
    pub root: &'static str,
    pub document: &'static str,
}

pub const REGISTER_USER: OperationDoc = OperationDoc {
    name: "RegisterUser",
    root: "register",
    document: r#"
mutation RegisterUser($input: RegisterUserDto!) {
  register(input: $input) {
    success
    message
    data {
      userId
    }
  }
}
"#,
};

pub const LOGIN: OperationDoc = OperationDoc {
    name: "Login",
    root: "login",
    document: r#"
mutation Login($input: LoginDto!) {
  login(input: $input) {
    success
    message
    data {
      accessToken
    }
  }
}
"#,
};

pub const CREATE_OFFER: OperationDoc = OperationDoc {
    name: "CreateOffer",
    root: "createOffer",
    document: r#"
mutation CreateOffer($input: CreateOfferDto!) {
  createOffer(input: $input) {
    success
    message
    data {
      id title description company location salary isInternship createdByHeadOfCareerId createdAt updatedAt
    }
  }
}
"#,
};

pub const APPLY_TO_OFFER: OperationDoc = OperationDoc {
    name: "ApplyToOffer",
    root: "applyToOffer",
    document: r#"
mutation ApplyToOffer($input: ApplyToOfferDto!) {
  applyToOffer(input: $input) {
    success
    message
    data {
      id title description company location salary isInternship createdByHeadOfCareerId createdAt updatedAt
    }
  }
}
"#,
};

pub const UPDATE_STATUS: OperationDoc = OperationDoc {
    name: "UpdateStatus",
    root: "updateApplicationStatus",
    document: r#"
mutation UpdateStatus($input: UpdateStatusDto!) {
  updateApplicationStatus(input: $input) {
    success
    message
  }
}
"#,
};

pub const GET_USER_PROFILE: OperationDoc = OperationDoc {
    name: "GetUserProfile",
    root: "getUserProfile",
    document: r#"
query GetUserProfile {
  getUserProfile {
    success
    message
    data {
      id
      name
      email
      role
    }
  }
}
"#,
};

pub const OFFERS: OperationDoc = OperationDoc {
    name: "Offers",
    root: "offers",
    document: r#"
query Offers {
  offers {
    success
    message
    data {
      id title description company location salary isInternship createdByHeadOfCareerId createdAt updatedAt
    }
  }
}
"#,
};

pub const GET_OFFER: OperationDoc = OperationDoc {
    name: "GetOffer",
    root: "offer",
    document: r#"
query GetOffer($id: String!) {
  offer(id: $id) {
    success
    message
    data {
      id title description company location salary isInternship createdByHeadOfCareerId createdAt updatedAt
    }
  }
}
"#,
};

pub const GET_APPLICANTS: OperationDoc = OperationDoc {
    name: "GetApplicants",
    root: "getApplicantsByOffer",
    document: r#"
query GetApplicants($offerId: String!) {
  getApplicantsByOffer(offerId: $offerId) {
    success
    message
    data {
      id
      offerId
      studentId
      message
      status
      createdAt
    }
  }
}
"#,
};

pub const GET_USER_APPLICATIONS: OperationDoc = OperationDoc {
    name: "GetUserApplications",
    root: "getApplicationsByStudent",
    document: r#"
query GetUserApplications($studentId: String) {
  getApplicationsByStudent(studentId: $studentId) {
    success
    message
    data {
      id
      offerId
      studentId
      message
      status
      createdAt
    }
  }
}
"#,
};

pub const GET_USER: OperationDoc = OperationDoc {
    name: "GetUser",
    root: "getUser",
    document: r#"
query GetUser($id: String!) {
  getUser(id: $id) {
    success
    message
    data {
      id
      name
      email
      role
    }
  }
}
"#,
};

pub const GET_CV: OperationDoc = OperationDoc {
    name: "GetCv",
    root: "getCv",
    document: r#"
query GetCv($userId: String!) {
  getCv(userId: $userId) {
    success
    message
    data {
      userId
      name
      description
      career
      email
      phone
      projects { id name url description }
      skills { id name rate }
    }
  }
}
"#,
};

pub const CREATE_CV: OperationDoc = OperationDoc {
    name: "CreateCv",
    root: "createCv",
    document: r#"
mutation CreateCv($input: CvDto!) {
  createCv(input: $input) {
    success
    message
    data {
      userId
      name
      description
      career
      email
      phone
      projects { id name url description }
      skills { id name rate }
    }
  }
}
"#,
};

pub const UPDATE_CV: OperationDoc = OperationDoc {
    name: "UpdateCv",
    root: "updateCv",
    document: r#"
mutation UpdateCv($input: CvDto!) {
  updateCv(input: $input) {
    success
    message
    data {
      userId
      name
      description
      career
      email
      phone
      projects { id name url description }
      skills { id name rate }
    }
  }
}
"#,
};
