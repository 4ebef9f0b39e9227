//! Demo records for development.
//!
//! The credentials here are public knowledge. Never ship them as real accounts.

use common::AppResult;
use domain::{
    AccountId, AccountSecret, Child, Education, EducationLevel, Employee, EmployeeId, Family,
    MaritalStatus, Password, Role, Sex, Spouse, UserAccount,
};

/// Two employees (newest first) and three accounts: `budi`, `rina` and `admin`,
/// each with its username as password.
pub fn demo_records() -> AppResult<(Vec<Employee>, Vec<AccountSecret>)> {
    let employees = vec![budi(), rina()];
    let accounts = vec![
        account("user-1", "budi", Role::User, Some("pegawai-1"))?,
        account("user-2", "rina", Role::User, Some("pegawai-2"))?,
        account("user-admin", "admin", Role::Admin, None)?,
    ];
    Ok((employees, accounts))
}

fn account(
    id: &str,
    username: &str,
    role: Role,
    employee_id: Option<&str>,
) -> AppResult<AccountSecret> {
    Ok(AccountSecret {
        account: UserAccount {
            id: AccountId::new(id),
            username: username.to_string(),
            role,
            employee_id: employee_id.map(EmployeeId::new),
        },
        password: Password::new(username)?,
    })
}

fn budi() -> Employee {
    Employee {
        id: EmployeeId::new("pegawai-1"),
        name: "Budi Santoso".to_string(),
        national_id: "3201234567890001".to_string(),
        birthplace: "Jakarta".to_string(),
        birth_date: "1990-05-15".to_string(),
        sex: Sex::Male,
        religion: "Islam".to_string(),
        email: "budi.santoso@example.com".to_string(),
        phone: "081234567890".to_string(),
        marital_status: MaritalStatus::Married,
        address: "Jl. Merdeka No. 10, Jakarta Pusat".to_string(),
        id_card_photo: Some("https://picsum.photos/seed/ktp1/400/300".to_string()),
        employee_number: "199005152015031001".to_string(),
        position: "Staff IT".to_string(),
        grade: "III/a".to_string(),
        rank: "Penata Muda".to_string(),
        family: Family {
            spouse: Spouse {
                name: "Siti Aminah".to_string(),
            },
            children: vec![
                Child {
                    id: "anak-1".to_string(),
                    name: "Adi Santoso".to_string(),
                },
                Child {
                    id: "anak-2".to_string(),
                    name: "Ani Santoso".to_string(),
                },
            ],
        },
        education: vec![
            Education {
                id: "pend-1".to_string(),
                level: EducationLevel::University,
                school_name: "Universitas Indonesia".to_string(),
                admission_year: "2008".to_string(),
                graduation_year: "2012".to_string(),
                certificate_number: "UI-12345".to_string(),
                certificate_photo: Some("https://picsum.photos/seed/ijazah1/400/500".to_string()),
            },
            Education {
                id: "pend-2".to_string(),
                level: EducationLevel::SeniorHigh,
                school_name: "SMA Negeri 1 Jakarta".to_string(),
                admission_year: "2005".to_string(),
                graduation_year: "2008".to_string(),
                certificate_number: "SMA-67890".to_string(),
                certificate_photo: None,
            },
        ],
    }
}

fn rina() -> Employee {
    Employee {
        id: EmployeeId::new("pegawai-2"),
        name: "Rina Wijaya".to_string(),
        national_id: "3201234567890002".to_string(),
        birthplace: "Bandung".to_string(),
        birth_date: "1992-08-20".to_string(),
        sex: Sex::Female,
        religion: "Kristen Protestan".to_string(),
        email: "rina.wijaya@example.com".to_string(),
        phone: "081298765432".to_string(),
        marital_status: MaritalStatus::Unmarried,
        address: "Jl. Asia Afrika No. 5, Bandung".to_string(),
        id_card_photo: Some("https://picsum.photos/seed/ktp2/400/300".to_string()),
        employee_number: "199208202018032001".to_string(),
        position: "Analis Keuangan".to_string(),
        grade: "III/b".to_string(),
        rank: "Penata Muda Tk. I".to_string(),
        family: Family::default(),
        education: vec![Education {
            id: "pend-3".to_string(),
            level: EducationLevel::University,
            school_name: "Institut Teknologi Bandung".to_string(),
            admission_year: "2010".to_string(),
            graduation_year: "2014".to_string(),
            certificate_number: "ITB-54321".to_string(),
            certificate_photo: Some("https://picsum.photos/seed/ijazah2/400/500".to_string()),
        }],
    }
}
